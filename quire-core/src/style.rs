//! Built-in stylesheet inlined into pages

const SANS_FONTS: &str = r#""Helvetica Neue", Helvetica, Arial, sans-serif"#;
const SERIF_FONTS: &str = r#"Georgia, "Times New Roman", Times, serif"#;

const BASE_CSS: &str = r#"
body {
    max-width: 46em;
    margin: 0 auto;
    padding: 1em 1.5em 3em;
    color: #222;
    background: #fdfdfd;
    line-height: 1.55;
}
h1, h2, h3, h4, h5, h6 { line-height: 1.2; }
h1.title { margin-bottom: 0.2em; }
h2.author, h3.date { font-weight: normal; color: #555; margin: 0.2em 0; }
p.summary { font-style: italic; }
p.comment { color: #777; }
dl dt { font-weight: bold; }
pre, code { font-family: Menlo, Consolas, monospace; font-size: 0.9em; }
pre { background: #f3f3f3; padding: 0.8em; overflow-x: auto; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 0.3em 0.6em; }
blockquote { margin-left: 0; padding-left: 1em; border-left: 3px solid #ddd; color: #555; }
article { margin: 2em 0; }
#head { border-bottom: 1px solid #ddd; margin-bottom: 1em; }
.toc ul { list-style: none; padding-left: 1.2em; }
.toc > ul { padding-left: 0; }
.nav { text-align: center; margin: 1em 0; }
.nav a { margin: 0 0.6em; }
"#;

/// Default stylesheet, in the serif or sans-serif variant
pub fn default_stylesheet(serif: bool) -> String {
    let fonts = if serif { SERIF_FONTS } else { SANS_FONTS };
    format!("\nbody {{ font-family: {fonts}; }}{BASE_CSS}")
}
