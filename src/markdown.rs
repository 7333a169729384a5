use pulldown_cmark::{Options, Parser, html};

/// Renders a post's markdown source to HTML.
/// Used when the editor did not submit a rendered body, and for posts that
/// only exist as markdown.
pub fn render(markdown_input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown_input, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
