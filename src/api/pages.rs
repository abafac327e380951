//! Server-rendered pages. Small enough that a template engine would be
//! overkill; every user-supplied value is escaped before interpolation.

use axum::response::Html;
use html_escape::encode_text;

use crate::entities::outing_passes;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - outpass</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }}\n\
         label {{ display: block; margin-top: 0.75rem; }}\n\
         input {{ padding: 0.4rem; width: 100%; box-sizing: border-box; }}\n\
         button {{ margin-top: 1rem; padding: 0.5rem 1.5rem; }}\n\
         table {{ border-collapse: collapse; }}\n\
         td, th {{ border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }}\n\
         nav {{ margin-bottom: 1.5rem; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = encode_text(title),
        body = body,
    )
}

fn login_body() -> String {
    layout(
        "Login",
        "<h1>Teacher Login</h1>\n\
         <form method=\"post\" action=\"/login\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p>No account? <a href=\"/register\">Register</a></p>",
    )
}

/// GET /
pub async fn index() -> Html<String> {
    Html(login_body())
}

/// GET /login
pub async fn login_form() -> Html<String> {
    Html(login_body())
}

/// GET /register
pub async fn register_form() -> Html<String> {
    Html(layout(
        "Register",
        "<h1>Teacher Registration</h1>\n\
         <form method=\"post\" action=\"/register\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p>Already registered? <a href=\"/login\">Log in</a></p>",
    ))
}

pub fn issue_page(username: &str) -> String {
    let body = format!(
        "<nav>Signed in as <strong>{username}</strong> | <a href=\"/logout\">Log out</a></nav>\n\
         <h1>Issue Outing Pass</h1>\n\
         <form method=\"post\" action=\"/create_outing_pass\">\n\
         <label>Student name <input type=\"text\" name=\"name\" required></label>\n\
         <label>Class <input type=\"text\" name=\"ban\" required></label>\n\
         <label>Reason <input type=\"text\" name=\"reason\" required></label>\n\
         <label>Valid until <input type=\"date\" name=\"expiry_date\" required></label>\n\
         <button type=\"submit\">Issue pass</button>\n\
         </form>",
        username = encode_text(username),
    );
    layout("Issue Outing Pass", &body)
}

pub fn pass_page(pass: &outing_passes::Model) -> String {
    let body = format!(
        "<h1>Outing Pass</h1>\n\
         <table>\n\
         <tr><th>Name</th><td>{name}</td></tr>\n\
         <tr><th>Class</th><td>{ban}</td></tr>\n\
         <tr><th>Issued</th><td>{issued}</td></tr>\n\
         <tr><th>Reason</th><td>{reason}</td></tr>\n\
         <tr><th>Valid until</th><td>{expiry}</td></tr>\n\
         <tr><th>Issued by</th><td>{teacher}</td></tr>\n\
         </table>\n\
         <p><img src=\"/static/{token}.png\" alt=\"Verification QR code\" width=\"320\" height=\"320\"></p>\n\
         <p><a href=\"/create_outing_pass\">Issue another pass</a></p>",
        name = encode_text(&pass.name),
        ban = encode_text(&pass.ban),
        issued = encode_text(&pass.issue_date),
        reason = encode_text(&pass.reason),
        expiry = encode_text(&pass.expiry_date),
        teacher = encode_text(&pass.teacher),
        token = encode_text(&pass.unique_id),
    );
    layout("Outing Pass", &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{title}</h1>\n\
         <p>{message}</p>\n\
         <p><a href=\"/\">Back to start</a></p>",
        title = encode_text(title),
        message = encode_text(message),
    );
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_page_escapes_user_fields() {
        let pass = outing_passes::Model {
            id: 1,
            name: "<script>alert(1)</script>".to_string(),
            issue_date: "2024-04-02 09:15:00".to_string(),
            reason: "Clinic & rest".to_string(),
            expiry_date: "2024-05-01".to_string(),
            teacher: "alice".to_string(),
            ban: "3-2".to_string(),
            unique_id: "0123456789abcdef0123456789abcdef".to_string(),
        };

        let html = pass_page(&pass);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Clinic &amp; rest"));
        assert!(html.contains("/static/0123456789abcdef0123456789abcdef.png"));
    }

    #[test]
    fn test_error_page_contains_message() {
        let html = error_page("Invalid pass", "This outing pass is invalid or unknown.");
        assert!(html.contains("Invalid pass"));
        assert!(html.contains("invalid or unknown"));
    }
}
