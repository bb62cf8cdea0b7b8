// src/engine/scanner.rs
//! Enumerate the fillable controls currently on the page

use crate::dom::PageDom;
use crate::types::FieldDescriptor;

/// Fresh scan of every visible text, textarea and select-kind control.
/// Nothing is cached; each call re-enumerates the document.
pub fn scan_fields<D: PageDom>(dom: &D) -> Vec<FieldDescriptor> {
    dom.form_controls()
        .into_iter()
        .filter_map(|handle| {
            let attributes = dom.control_attributes(handle)?;
            if attributes.kind.is_excluded() || !dom.has_layout_box(handle) {
                return None;
            }
            Some(FieldDescriptor::new(handle, attributes, true))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{HtmlPage, PageLocation};

    fn page(markup: &str) -> HtmlPage {
        HtmlPage::parse(PageLocation::new("jobs.example.com", "/apply"), markup)
    }

    #[test]
    fn test_excludes_non_data_kinds() {
        let page = page(
            r#"<form>
                 <input type="hidden" name="csrf">
                 <input type="submit" name="go">
                 <input type="button" name="b">
                 <input type="reset" name="r">
                 <input name="first_name">
                 <textarea name="cover"></textarea>
                 <select name="experience"><option>1</option></select>
                 <input type="checkbox" name="terms">
               </form>"#,
        );

        let names: Vec<String> = scan_fields(&page).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["first_name", "cover", "experience", "terms"]);
    }

    #[test]
    fn test_excludes_controls_without_layout_box() {
        let page = page(
            r#"<input name="visible">
               <input name="styled" style="display:none">
               <div style="display: none"><textarea name="nested"></textarea></div>
               <section hidden><select name="hidden_section"></select></section>"#,
        );

        let fields = scan_fields(&page);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "visible");
        assert!(fields[0].visible);
    }

    #[test]
    fn test_scan_is_restartable_and_reflects_mutations() {
        let mut page = page(r#"<body><div id="slot"></div></body>"#);
        assert!(scan_fields(&page).is_empty());

        let slot = page.find("#slot").unwrap();
        let added = page.append_html(slot, r#"<input name="email">"#).unwrap();
        assert_eq!(scan_fields(&page).len(), 1);
        assert_eq!(scan_fields(&page).len(), 1);

        page.remove(added[0]);
        assert!(scan_fields(&page).is_empty());
    }
}
