//! Standalone HTML page previewing a directory of colormaps.

use crate::error::ColormapError;
use crate::legend::html_legend;
use crate::Colormap;
use std::path::Path;
use walkdir::WalkDir;

/// A colormap together with the file name it was loaded from.
#[derive(Debug, Clone)]
pub struct NamedColormap {
    pub name: String,
    pub colormap: Colormap,
}

/// Load every regular file directly inside `dir`, sorted by file name.
///
/// Any unreadable or malformed file fails the whole load.
pub fn load_colormap_dir(dir: impl AsRef<Path>) -> Result<Vec<NamedColormap>, ColormapError> {
    let dir = dir.as_ref();
    let mut maps = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ColormapError::Io {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let colormap = Colormap::read(entry.path())?;
        maps.push(NamedColormap {
            name: entry.file_name().to_string_lossy().into_owned(),
            colormap,
        });
    }

    tracing::info!(dir = %dir.display(), count = maps.len(), "Loaded colormaps");
    Ok(maps)
}

/// Render the preview page: one section per colormap with its name, doc
/// comment and legend.
pub fn render_preview_page(colormaps: &[NamedColormap]) -> String {
    let mut sections = String::new();
    for named in colormaps {
        sections.push_str("<section>");
        sections.push_str(&format!("<h2>{}</h2>", escape_html(&named.name)));
        sections.push_str(&format!(
            "<p class=\"units\">{}</p>",
            escape_html(named.colormap.units())
        ));
        if let Some(doc) = named.colormap.doc_comment() {
            sections.push_str(&format!("<p>{}</p>", escape_html(doc)));
        }
        sections.push_str(&format!("<div>{}</div>", html_legend(&named.colormap)));
        sections.push_str("</section>\n");
    }

    PREVIEW_TEMPLATE.replace("__PREVIEW__", &sections)
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

const PREVIEW_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Preview colormaps - weather-maps</title>
    <link rel="shortcut icon" type="image/x-icon" href="data:image/x-icon;,">
    <style>
        body {
            font-family: system-ui;
            color: rgb(51, 65, 85);
        }

        .preview {
            font-size: 12px;
            width: 100%;
            max-width: 400px;
        }

        .preview .units {
            font-style: italic;
        }
    </style>
</head>
<body>
<h1>Preview colormaps</h1>
<div class="preview">__PREVIEW__</div>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#x27;b&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_preview_page_escapes_names_and_docs() {
        let colormap = Colormap::parse("# <script>\n# units: K\n0,0,50,50\n").unwrap();
        let page = render_preview_page(&[NamedColormap {
            name: "temp<1>.txt".to_string(),
            colormap,
        }]);

        assert!(page.contains("<h2>temp&lt;1&gt;.txt</h2>"));
        assert!(page.contains("<p>&lt;script&gt;</p>"));
        assert!(!page.contains("<script>"));
        assert!(!page.contains("__PREVIEW__"));
    }
}
