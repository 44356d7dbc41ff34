//! HTML templates for the admin pages.
//!
//! Every interpolated value goes through `html::escape`.

use crate::common::html::escape;
use crate::domains::registration::models::{Registration, RegistrationStatus};

const STYLE: &str = r#"<style>
    body { font-family: system-ui, -apple-system, sans-serif; background: #000; color: #fff; max-width: 1100px; margin: 40px auto; padding: 0 16px; }
    table { width: 100%; border-collapse: collapse; font-size: 14px; }
    th, td { text-align: left; padding: 8px 12px; border-top: 1px solid #27272a; }
    thead { background: #18181b; }
    .muted { color: #9ca3af; font-size: 12px; }
    .status { text-transform: capitalize; }
    button { padding: 4px 12px; border-radius: 6px; background: transparent; color: #fff; cursor: pointer; }
    button:disabled { opacity: 0.4; cursor: default; }
    .approve { border: 1px solid #10b981; }
    .reject { border: 1px solid #ef4444; }
    .error { color: #f87171; }
</style>"#;

/// Table of every registration with approve/reject buttons.
pub fn admin_page(registrations: &[Registration]) -> String {
    let rows: String = if registrations.is_empty() {
        r#"<tr><td colspan="6" class="muted">No registrations yet.</td></tr>"#.to_string()
    } else {
        registrations.iter().map(admin_row).collect()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Admin – Registrations</title>
    {STYLE}
</head>
<body>
    <h1>Admin – Registrations</h1>
    <p class="muted">Approve or reject workshop registrations. Rejection emails include a support phone number.</p>
    <p id="message" class="error"></p>
    <table>
        <thead>
            <tr><th>Name</th><th>Email</th><th>Status</th><th>Created</th><th>Receipt</th><th>Actions</th></tr>
        </thead>
        <tbody>
{rows}
        </tbody>
    </table>
    <form method="post" action="/api/admin/logout" onsubmit="return logout(event)">
        <p><button type="submit">Log out</button></p>
    </form>
    <script>
        async function review(id, action) {{
            document.getElementById('message').textContent = '';
            try {{
                const res = await fetch('/api/admin/' + action, {{
                    method: 'POST',
                    headers: {{ 'Content-Type': 'application/json' }},
                    body: JSON.stringify({{ id }}),
                }});
                const json = await res.json();
                if (!res.ok || !json.ok) {{
                    document.getElementById('message').textContent =
                        (json.errors && json.errors.join(' ')) || 'Action failed.';
                }} else {{
                    window.location.reload();
                }}
            }} catch (err) {{
                document.getElementById('message').textContent = 'Network or server error.';
            }}
        }}
        async function logout(event) {{
            event.preventDefault();
            await fetch('/api/admin/logout', {{ method: 'POST' }});
            window.location.href = '/admin/login';
            return false;
        }}
    </script>
</body>
</html>"#
    )
}

fn admin_row(registration: &Registration) -> String {
    let id = escape(&registration.id.to_string());
    let approved = registration.status == RegistrationStatus::Approved;
    let rejected = registration.status == RegistrationStatus::Rejected;

    format!(
        r#"            <tr>
                <td>{name}</td>
                <td>{email}</td>
                <td class="status">{status}</td>
                <td class="muted">{created}</td>
                <td class="muted">{receipt}</td>
                <td>
                    <button class="approve" onclick="review('{id}', 'approve')"{approve_disabled}>Approve</button>
                    <button class="reject" onclick="review('{id}', 'reject')"{reject_disabled}>Reject</button>
                </td>
            </tr>
"#,
        name = escape(&registration.full_name),
        email = escape(&registration.email),
        status = registration.status,
        created = registration.created_at.format("%Y-%m-%d %H:%M"),
        receipt = escape(&registration.receipt_path),
        approve_disabled = if approved { " disabled" } else { "" },
        reject_disabled = if rejected { " disabled" } else { "" },
    )
}

/// Password form posting to `/api/admin/login`.
pub fn login_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Admin Login</title>
    {STYLE}
</head>
<body>
    <h1>Admin Login</h1>
    <form onsubmit="return login(event)">
        <p><input id="password" type="password" name="password" placeholder="Admin password" required></p>
        <p><button type="submit">Log in</button></p>
    </form>
    <p id="message" class="error"></p>
    <script>
        async function login(event) {{
            event.preventDefault();
            const res = await fetch('/api/admin/login', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify({{ password: document.getElementById('password').value }}),
            }});
            if (res.ok) {{
                window.location.href = '/admin';
            }} else {{
                const json = await res.json().catch(() => ({{}}));
                document.getElementById('message').textContent =
                    (json.errors && json.errors.join(' ')) || 'Login failed.';
            }}
            return false;
        }}
    </script>
</body>
</html>"#
    )
}
