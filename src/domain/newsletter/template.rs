//! Newsletter email rendering.
//!
//! Produces the HTML and plain-text bodies for one recipient. Every link
//! that leaves the email is routed through the click tracker, and a 1x1
//! pixel reports the open.

use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag};

use super::links::TrackingLinks;
use super::post::NewsletterPost;
use super::subscriber::Subscriber;
use super::tokens::TrackingToken;

/// A rendered email ready for a `MailTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Renders `post` for `subscriber`, correlating opens and clicks via `token`.
pub fn render_newsletter(
    post: &NewsletterPost,
    subscriber: &Subscriber,
    token: &TrackingToken,
    links: &TrackingLinks,
) -> RenderedEmail {
    let post_url = links.absolute(&post.path());
    let read_more_url = links.click_url(token, &post_url);
    let unsubscribe_url = links.unsubscribe_url(&subscriber.unsubscribe_token);
    let pixel_url = links.open_pixel_url(token);

    let excerpt_html = post
        .excerpt
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .map(|e| format!(r#"<p class="excerpt">{}</p>"#, html_escape(e)))
        .unwrap_or_default();

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="zh-Hant">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        {excerpt}
        <div class="content">
{body}
        </div>
        <p class="cta"><a class="button" href="{read_more}">閱讀全文</a></p>
        <hr>
        <p class="footer">
            您收到這封信是因為您訂閱了我們的電子報。
            <a href="{unsubscribe}">取消訂閱</a>
        </p>
    </div>
    <img src="{pixel}" width="1" height="1" alt="" style="display:none">
</body>
</html>"#,
        title = html_escape(&post.title),
        css = EMAIL_CSS,
        excerpt = excerpt_html,
        body = tracked_markdown_to_html(&post.content, token, links),
        read_more = html_escape(&read_more_url),
        unsubscribe = html_escape(&unsubscribe_url),
        pixel = html_escape(&pixel_url),
    );

    let mut text = post.title.clone();
    text.push_str("\n\n");
    if let Some(excerpt) = post.excerpt.as_deref().filter(|e| !e.trim().is_empty()) {
        text.push_str(excerpt.trim());
        text.push_str("\n\n");
    }
    text.push_str(&format!("閱讀全文：{}\n\n", post_url));
    text.push_str(&format!("取消訂閱：{}\n", unsubscribe_url));

    RenderedEmail {
        subject: post.title.clone(),
        html,
        text,
    }
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Converts markdown to an HTML fragment with web links rewritten through
/// the click tracker. Site-relative links are made absolute first. Anchors,
/// `mailto:` and images are left untouched.
pub fn tracked_markdown_to_html(
    markdown: &str,
    token: &TrackingToken,
    links: &TrackingLinks,
) -> String {
    let parser = Parser::new_ext(markdown, markdown_options()).map(|event| match event {
        Event::Start(Tag::Link(kind, dest, title)) if kind != LinkType::Email => {
            let dest = match tracked_destination(&dest, token, links) {
                Some(tracked) => CowStr::from(tracked),
                None => dest,
            };
            Event::Start(Tag::Link(kind, dest, title))
        }
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn tracked_destination(dest: &str, token: &TrackingToken, links: &TrackingLinks) -> Option<String> {
    let dest = dest.trim();
    if dest.starts_with("http://") || dest.starts_with("https://") {
        Some(links.click_url(token, dest))
    } else if dest.starts_with('/') && !dest.starts_with("//") {
        Some(links.click_url(token, &links.absolute(dest)))
    } else {
        None
    }
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const EMAIL_CSS: &str = "body{margin:0;padding:0;background:#f6f6f4;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI','Noto Sans TC',sans-serif;color:#2b2b2b;line-height:1.7}\
.container{max-width:600px;margin:0 auto;padding:32px 24px;background:#fff}\
h1{font-size:24px;margin:0 0 12px}\
.excerpt{color:#6b6b6b;font-style:italic}\
.content img{max-width:100%}\
.button{display:inline-block;padding:10px 20px;background:#3d5a80;color:#fff;text-decoration:none;border-radius:4px}\
.footer{font-size:12px;color:#8a8a8a}";
