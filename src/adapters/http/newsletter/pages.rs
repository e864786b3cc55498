//! Server-rendered pages for unsubscribe links opened in a browser.

use crate::domain::newsletter::html_escape;

pub fn unsubscribe_page(title: &str, message: &str, site_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-Hant">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>body{{font-family:-apple-system,BlinkMacSystemFont,'Noto Sans TC',sans-serif;background:#f6f6f4;color:#2b2b2b;display:flex;align-items:center;justify-content:center;min-height:100vh;margin:0}}main{{background:#fff;padding:40px;border-radius:8px;max-width:420px;text-align:center}}a{{color:#3d5a80}}</style>
</head>
<body>
    <main>
        <h1>{title}</h1>
        <p>{message}</p>
        <p><a href="{home}">回到首頁</a></p>
    </main>
</body>
</html>"#,
        title = html_escape(title),
        message = html_escape(message),
        home = html_escape(site_url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_escapes_inputs() {
        let page = unsubscribe_page("<t>", "a & b", "https://blog.example.com");
        assert!(page.contains("<h1>&lt;t&gt;</h1>"));
        assert!(page.contains("a &amp; b"));
        assert!(page.contains(r#"href="https://blog.example.com""#));
    }
}
