//! Shared page shell

use html_escape::encode_text;

const SITE_NAME: &str = "Document Shelf";

/// Wrap rendered `main` content in the site layout.
///
/// `title` and `subtitle` are plain text and escaped here; `main` is trusted
/// markup produced by the other renderers.
pub fn page(title: &str, subtitle: Option<&str>, main: &str) -> String {
    let subtitle = subtitle
        .map(|s| format!(r#"<p class="mt-2">{}</p>"#, encode_text(s)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {site}</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-100 font-sans">
    <header class="bg-blue-600 text-white py-6">
        <div class="container mx-auto px-4">
            <h1 class="text-3xl font-bold">{title}</h1>
            {subtitle}
        </div>
    </header>
    <main class="container mx-auto px-4 py-8">
{main}
    </main>
    <footer class="bg-gray-800 text-white py-4">
        <div class="container mx-auto px-4 text-center">
            <p>{site}</p>
        </div>
    </footer>
</body>
</html>
"#,
        title = encode_text(title),
        site = SITE_NAME,
        subtitle = subtitle,
        main = main,
    )
}
