//! SVG text cleanup and best-effort attribute scanning.

use regex::Regex;

/// The viewBox rectangle declared by an SVG document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Remove the declarations that break strict parsing of already-decoded
/// text: the `<?xml ...?>` prolog and any `encoding="..."` attribute.
///
/// Nothing else is validated or rewritten; any other malformation
/// surfaces as a downstream parse failure.
pub fn clean_svg_text(text: &str) -> String {
    let text = Regex::new(r"<\?xml[^>]+\?>").unwrap().replace_all(text, "");
    Regex::new(r#"encoding="[^"]+""#)
        .unwrap()
        .replace_all(&text, "")
        .into_owned()
}

/// Scan for the first `viewBox` attribute and parse its four numbers.
///
/// This is a surface text scan, not an attribute parse: the first match
/// wins (even if several elements declare one), namespaces are ignored,
/// and a malformed value yields `None` rather than an error.
pub fn find_view_box(text: &str) -> Option<ViewBox> {
    let re = Regex::new(r#"viewBox=["']([^"']+)["']"#).unwrap();
    let raw = re.captures(text)?.get(1)?.as_str();
    let mut numbers = raw.split_whitespace().map(str::parse::<f64>);
    let min_x = numbers.next()?.ok()?;
    let min_y = numbers.next()?.ok()?;
    let width = numbers.next()?.ok()?;
    let height = numbers.next()?.ok()?;
    Some(ViewBox {
        min_x,
        min_y,
        width,
        height,
    })
}

/// Collect the `d` attribute of every `path` element, in document order.
///
/// Group and element transforms are ignored; a document without any path
/// elements yields an empty list.
pub(crate) fn path_data(text: &str) -> Result<Vec<String>, roxmltree::Error> {
    let doc = roxmltree::Document::parse(text)?;
    Ok(doc
        .descendants()
        .filter(|node| node.tag_name().name() == "path")
        .filter_map(|node| node.attribute("d").map(str::to_owned))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_removes_xml_decl() {
        let text = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg/>";
        assert_eq!(clean_svg_text(text), "\n<svg/>");
    }

    #[test]
    fn cleanup_removes_stray_encoding_attr() {
        let text = "<svg encoding=\"UTF-8\" viewBox=\"0 0 1 1\"/>";
        assert_eq!(clean_svg_text(text), "<svg  viewBox=\"0 0 1 1\"/>");
    }

    #[test]
    fn view_box_double_quoted() {
        let vb = find_view_box("<svg viewBox=\"0 0 100 100\">").unwrap();
        assert_eq!(
            vb,
            ViewBox {
                min_x: 0.0,
                min_y: 0.0,
                width: 100.0,
                height: 100.0
            }
        );
    }

    #[test]
    fn view_box_single_quoted_with_origin() {
        let vb = find_view_box("<svg viewBox='-5 -10 24 48'>").unwrap();
        assert_eq!(
            vb,
            ViewBox {
                min_x: -5.0,
                min_y: -10.0,
                width: 24.0,
                height: 48.0
            }
        );
    }

    #[test]
    fn view_box_first_match_wins() {
        let text = "<svg viewBox=\"0 0 10 10\"><svg viewBox=\"0 0 99 99\"/></svg>";
        assert_eq!(find_view_box(text).unwrap().width, 10.0);
    }

    #[test]
    fn view_box_absent_or_malformed_is_none() {
        assert!(find_view_box("<svg width=\"10\"/>").is_none());
        assert!(find_view_box("<svg viewBox=\"0 0 ten 10\"/>").is_none());
        assert!(find_view_box("<svg viewBox=\"0 0 10\"/>").is_none());
    }

    #[test]
    fn path_data_in_document_order_ignoring_namespace() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <path d="M0 0 L1 1"/>
            <g><path d="M2 2 L3 3"/></g>
        </svg>"#;
        assert_eq!(path_data(text).unwrap(), vec!["M0 0 L1 1", "M2 2 L3 3"]);
    }

    #[test]
    fn path_data_empty_document() {
        assert!(path_data("<svg><rect/></svg>").unwrap().is_empty());
    }
}
