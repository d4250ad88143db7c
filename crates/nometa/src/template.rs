//! Marker-delimited splicing into the HTML template.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::config::Config;
use crate::error::Result;

/// Everything from the start marker to the last end marker.
static MARKER_REGION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<meta name="nometa_start"/>.+<meta name="nometa_end"/>"#)
        .expect("marker region regex should compile")
});

/// Replace the marker region of `template` with `html`.
///
/// `html` is inserted literally. A template without a region is returned
/// unchanged.
pub fn splice(template: &str, html: &str) -> String {
    MARKER_REGION_REGEX
        .replace(template, NoExpand(html))
        .into_owned()
}

/// Read the fallback template from the document root.
pub async fn load(config: &Config) -> Result<String> {
    Ok(tokio::fs::read_to_string(config.template_path()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    const TEMPLATE: &str = concat!(
        "<html><head>\n",
        "<meta name=\"nometa_start\"/>\n",
        "<title>Default</title>\n",
        "<meta name=\"nometa_end\"/>\n",
        "</head><body></body></html>"
    );

    #[test]
    fn region_replaced() {
        let out = splice(TEMPLATE, "<title>X</title>");
        assert_eq!(
            out,
            "<html><head>\n<title>X</title>\n</head><body></body></html>"
        );
    }

    #[test]
    fn no_markers_unchanged() {
        let template = "<html><head><title>Plain</title></head></html>";
        assert_eq!(splice(template, "<title>X</title>"), template);
    }

    #[test]
    fn only_start_marker_unchanged() {
        let template = "<meta name=\"nometa_start\"/><title>Plain</title>";
        assert_eq!(splice(template, "X"), template);
    }

    #[test]
    fn dollar_signs_inserted_literally() {
        let out = splice(TEMPLATE, "price $1 and ${name}");
        assert!(out.contains("price $1 and ${name}"));
    }

    #[test]
    fn greedy_to_last_end_marker() {
        let template = concat!(
            "<meta name=\"nometa_start\"/>a",
            "<meta name=\"nometa_end\"/>b",
            "<meta name=\"nometa_end\"/>c"
        );
        assert_eq!(splice(template, "X"), "Xc");
    }

    #[tokio::test]
    async fn load_reads_template_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), TEMPLATE).unwrap();

        let config = Config {
            bind_addr: "127.0.0.1:0".to_string(),
            root: dir.path().to_path_buf(),
            template_file: "index.html".to_string(),
            url_template: "https://njump.me/<bech32>".to_string(),
            default_relays: vec![],
            fetch_timeout: Duration::from_secs(1),
        };
        assert_eq!(load(&config).await.unwrap(), TEMPLATE);

        let missing = Config {
            root: PathBuf::from("/nonexistent/nometa"),
            ..config
        };
        assert!(load(&missing).await.is_err());
    }
}
