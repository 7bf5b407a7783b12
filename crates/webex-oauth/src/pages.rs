//! HTML documents served to the end user
//!
//! Every dynamic value is escaped for the context it lands in.

use html_escape::{encode_double_quoted_attribute, encode_text};

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            background: #F3F4F6;
            margin: 0;
            padding: 0;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
        }
        .container {
            background: #ffffff;
            padding: 48px;
            border-radius: 8px;
            box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
            max-width: 500px;
            width: 100%;
            text-align: center;
        }
        h1 {
            margin: 0 0 16px 0;
            font-size: 24px;
            font-weight: 600;
            color: #111827;
        }
        p {
            margin: 0 0 8px 0;
            font-size: 16px;
            color: #6B7280;
            line-height: 1.5;
        }
        .details {
            background: #FEF2F2;
            border: 1px solid #FEE2E2;
            padding: 12px;
            border-radius: 8px;
            margin: 16px 0;
            font-family: 'SF Mono', Monaco, 'Courier New', monospace;
            font-size: 14px;
            color: #991B1B;
            word-break: break-word;
            text-align: left;
        }
        a.button {
            display: inline-block;
            margin-top: 16px;
            padding: 12px 24px;
            border-radius: 24px;
            background: #07C1E4;
            color: #ffffff;
            text-decoration: none;
            font-weight: 600;
        }
"#;

/// Message shown when a flow stops early
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub heading: String,
    pub message: String,
    pub detail: Option<String>,
}

impl Feedback {
    pub fn new(heading: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Home page with the link that starts the authorization flow
pub fn index_page(authorize_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Webex OAuth Integration</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>Webex OAuth Integration</h1>
        <p>This integration acts on your behalf: once you grant access, a bot adds you to the demo space and the space opens right here.</p>
        <a class="button" href="{link}">Start the OAuth flow</a>
    </div>
</body>
</html>
"#,
        link = encode_double_quoted_attribute(authorize_url),
    )
}

/// Page explaining why the flow stopped
pub fn feedback_page(feedback: &Feedback) -> String {
    let detail = feedback
        .detail
        .as_deref()
        .map(|d| format!(r#"<div class="details">{}</div>"#, encode_text(d)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{heading}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>{heading}</h1>
        <p>{message}</p>
        {detail}
    </div>
</body>
</html>
"#,
        heading = encode_text(&feedback.heading),
        message = encode_text(&feedback.message),
    )
}

/// Space widget opened with the user's access token
pub fn widget_page(access_token: &str, space_id: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Webex Space</title>
    <link rel="stylesheet" href="https://code.s4d.io/widget-space/production/main.css">
    <style>
        html, body {{ margin: 0; height: 100%; }}
        #webex-space-widget {{ width: 100%; height: 100%; }}
    </style>
</head>
<body>
    <div id="webex-space-widget"
        data-toggle="ciscospark-space"
        data-access-token="{token}"
        data-destination-type="spaceId"
        data-destination-id="{space}"></div>
    <script src="https://code.s4d.io/widget-space/production/bundle.js"></script>
</body>
</html>
"#,
        token = encode_double_quoted_attribute(access_token),
        space = encode_double_quoted_attribute(space_id),
    )
}
