//! Test fixtures for building registration submissions.

use super::MultipartForm;

/// A complete valid submission except for the receipt
pub fn jane_doe_fields() -> MultipartForm {
    MultipartForm::new()
        .text("fullName", "Jane Doe")
        .text("tpNumber", "TP012345")
        .text("sex", "female")
        .text("age", "21")
        .text("email", "jane@x.com")
        .text("phone", "0123456789")
        .text("nationality", "Malaysia")
}

/// Jane Doe with a 2 KB PNG receipt
pub fn jane_doe_form() -> MultipartForm {
    jane_doe_fields().file("receipt", "receipt.png", "image/png", &png_bytes(2 * 1024))
}

pub fn png_bytes(size: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; size];
    let signature = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    let n = signature.len().min(size);
    bytes[..n].copy_from_slice(&signature[..n]);
    bytes
}
