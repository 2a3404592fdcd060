use crate::utils::constants::Field;
use crate::Error;

/// An owned XML element, detached from the response text it was parsed from
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Element {
    pub name: String,
    /// Concatenated text directly inside this element, [None] if there is none
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>, text: Option<String>, children: Vec<Element>) -> Self {
        Self { name: name.into(), text, children }
    }

    fn from_node(node: roxmltree::Node) -> Self {
        let children = node
            .children()
            .filter(|child| child.is_element())
            .map(Element::from_node)
            .collect();

        let mut text: Option<String> = None;
        for part in node.children().filter(|child| child.is_text()).filter_map(|child| child.text()) {
            text.get_or_insert_with(String::new).push_str(part);
        }

        Self::new(node.tag_name().name(), text, children)
    }

    /// First direct child with the given tag name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Every descendant `row` element in document order (the element itself included)
    pub fn rows(&self) -> Vec<&Element> {
        let mut rows = Vec::new();
        self.collect(Field::ROW, &mut rows);
        rows
    }

    fn collect<'a>(&'a self, name: &str, into: &mut Vec<&'a Element>) {
        if self.name == name {
            into.push(self);
        }
        for child in &self.children {
            child.collect(name, into);
        }
    }

    /// Text of a mandatory field. <br>
    /// A present but empty field is returned as an empty string
    pub fn field(&self, name: &str) -> Result<&str, Error> {
        match self.child(name) {
            Some(element) => Ok(element.text.as_deref().unwrap_or("")),
            None => Err(Error::MissingField(name.to_string())),
        }
    }

    /// Text of a field that may be missing or empty
    pub fn optional_field(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|element| element.text.as_deref())
    }
}

/// Parses a full XML document and returns its root element
pub fn parse_document(text: &str) -> Result<Element, Error> {
    let document = roxmltree::Document::parse(text)
        .map_err(|e| Error::Parsing(format!("failed to parse response as XML '{}'", e)))?;
    Ok(Element::from_node(document.root_element()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<result>
    <rows>
        <row><Code.Unité>E1_IGI_1104</Code.Unité><Libellé.Unité>  Algo  </Libellé.Unité></row>
        <row><Code.Unité>E1_IGI_1105</Code.Unité><Libellé.Unité/></row>
    </rows>
</result>"#;

    #[test]
    fn test_parse_document() {
        let root = parse_document(DOCUMENT).unwrap();
        assert_eq!(root.name, "result");

        let rows = root.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field("Code.Unité").unwrap(), "E1_IGI_1104");
        assert_eq!(rows[0].optional_field("Libellé.Unité"), Some("  Algo  "));
        assert_eq!(rows[1].optional_field("Libellé.Unité"), None);
        assert_eq!(rows[1].field("Libellé.Unité").unwrap(), "");
    }

    #[test]
    fn test_missing_field() {
        let root = parse_document("<row><a>1</a></row>").unwrap();
        assert_eq!(root.field("b"), Err(Error::MissingField(String::from("b"))));
        assert_eq!(root.rows().len(), 1);
    }

    #[test]
    fn test_entities_are_decoded() {
        let root = parse_document("<row><a>A &amp; B</a></row>").unwrap();
        assert_eq!(root.field("a").unwrap(), "A & B");
    }

    #[test]
    fn test_malformed_document() {
        for text in ["", "not xml at all", "<row><a>1</row>", "<row>"] {
            match parse_document(text) {
                Err(Error::Parsing(_)) => {}
                other => panic!("expected a parsing error for '{}', got {:?}", text, other),
            }
        }
    }
}
