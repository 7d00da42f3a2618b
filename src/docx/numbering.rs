//! `word/numbering.xml`: writing numbering definitions and reading them back.

use super::properties::indentation_element;
use super::xml::{XmlElement, NS_W};
use crate::error::{Error, Result};
use crate::model::{Alignment, Indentation};
use crate::numbering::{
    AbstractNumId, AbstractNumbering, Level, NumId, NumberFormat, NumberingInstance,
    NumberingModel,
};
use std::collections::BTreeMap;

/// Build the `w:numbering` element: all abstract definitions, then all
/// instances. Every `w:abstractNum` must precede the first `w:num`.
pub fn write_numbering(model: &NumberingModel) -> XmlElement {
    let mut root = XmlElement::new("w:numbering").attr("xmlns:w", NS_W);

    for definition in &model.abstracts {
        let multi = if definition.levels.len() == 1 {
            "singleLevel"
        } else {
            "multilevel"
        };
        let mut el = XmlElement::new("w:abstractNum")
            .attr("w:abstractNumId", definition.id.0)
            .child(XmlElement::val("w:multiLevelType", multi));
        for level in &definition.levels {
            el.push(level_element(level));
        }
        root.push(el);
    }

    for instance in &model.instances {
        let mut el = XmlElement::new("w:num")
            .attr("w:numId", instance.id.0)
            .child(XmlElement::val("w:abstractNumId", instance.abstract_id.0));
        for (level, start) in &instance.start_overrides {
            el.push(
                XmlElement::new("w:lvlOverride")
                    .attr("w:ilvl", level)
                    .child(XmlElement::val("w:startOverride", start)),
            );
        }
        root.push(el);
    }

    root
}

fn level_element(level: &Level) -> XmlElement {
    let mut el = XmlElement::new("w:lvl")
        .attr("w:ilvl", level.index)
        .child(XmlElement::val("w:start", level.start))
        .child(XmlElement::val("w:numFmt", level.format.as_ooxml()))
        .child(XmlElement::val("w:lvlText", &level.template));
    if let Some(jc) = &level.justification {
        el.push(XmlElement::val("w:lvlJc", jc.as_ooxml()));
    }
    if let Some(ind) = level.indent.as_ref().and_then(indentation_element) {
        el.push(XmlElement::new("w:pPr").child(ind));
    }
    el
}

/// Parse `word/numbering.xml` back into a validated [`NumberingModel`].
pub fn parse_numbering(xml: &str) -> Result<NumberingModel> {
    let mut model = NumberingModel::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current_abstract: Option<AbstractNumbering> = None;
    let mut current_level: Option<Level> = None;
    let mut current_num: Option<NumberingInstance> = None;
    let mut override_level: Option<u8> = None;

    loop {
        let (e, is_empty) = match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => (e, false),
            Ok(quick_xml::events::Event::Empty(e)) => (e, true),
            Ok(quick_xml::events::Event::End(e)) => {
                match e.name().as_ref() {
                    b"w:abstractNum" => {
                        if let Some(definition) = current_abstract.take() {
                            model.insert_abstract(definition)?;
                        }
                    }
                    b"w:lvl" => {
                        if let (Some(level), Some(definition)) =
                            (current_level.take(), current_abstract.as_mut())
                        {
                            definition.levels.push(level);
                        }
                    }
                    b"w:num" => {
                        if let Some(instance) = current_num.take() {
                            model.insert_instance(instance)?;
                        }
                    }
                    b"w:lvlOverride" => override_level = None,
                    _ => {}
                }
                buf.clear();
                continue;
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {
                buf.clear();
                continue;
            }
        };

        let attr = |key: &[u8]| -> Option<String> {
            e.attributes()
                .flatten()
                .find(|a| a.key.as_ref() == key)
                .map(|a| {
                    a.unescape_value()
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&a.value).into_owned())
                })
        };
        let number = |key: &[u8]| -> Result<u32> {
            let value = attr(key).unwrap_or_default();
            value.parse().map_err(|_| {
                Error::definition(format!(
                    "{} has non-numeric {} {:?}",
                    String::from_utf8_lossy(e.name().as_ref()),
                    String::from_utf8_lossy(key),
                    value
                ))
            })
        };

        let level_index = || -> Result<u8> {
            let value = number(b"w:ilvl")?;
            u8::try_from(value)
                .map_err(|_| Error::definition(format!("level index {} out of range", value)))
        };

        match e.name().as_ref() {
            b"w:abstractNum" if !is_empty => {
                current_abstract = Some(AbstractNumbering {
                    id: AbstractNumId(number(b"w:abstractNumId")?),
                    levels: Vec::new(),
                });
            }
            b"w:lvl" if current_abstract.is_some() && !is_empty => {
                let index = level_index()?;
                current_level = Some(Level::numbered(index, NumberFormat::Decimal, ""));
            }
            b"w:start" => {
                if let Some(level) = current_level.as_mut() {
                    level.start = number(b"w:val")?;
                }
            }
            b"w:numFmt" => {
                if let Some(level) = current_level.as_mut() {
                    let value = attr(b"w:val").unwrap_or_default();
                    level.format = NumberFormat::from_ooxml(&value).ok_or_else(|| {
                        Error::definition(format!("unsupported number format {:?}", value))
                    })?;
                }
            }
            b"w:lvlText" => {
                if let Some(level) = current_level.as_mut() {
                    level.template = attr(b"w:val").unwrap_or_default();
                }
            }
            b"w:lvlJc" => {
                if let Some(level) = current_level.as_mut() {
                    level.justification =
                        attr(b"w:val").as_deref().and_then(Alignment::from_ooxml);
                }
            }
            b"w:ind" => {
                if let Some(level) = current_level.as_mut() {
                    let signed = |key: &[u8]| attr(key).and_then(|v| v.parse::<i32>().ok());
                    level.indent = Some(Indentation {
                        left: signed(b"w:left").or_else(|| signed(b"w:start")),
                        right: signed(b"w:right").or_else(|| signed(b"w:end")),
                        first_line: signed(b"w:firstLine"),
                        hanging: signed(b"w:hanging"),
                    });
                }
            }
            b"w:num" if !is_empty => {
                current_num = Some(NumberingInstance {
                    id: NumId(number(b"w:numId")?),
                    abstract_id: AbstractNumId(u32::MAX),
                    start_overrides: BTreeMap::new(),
                });
            }
            b"w:abstractNumId" => {
                if let Some(instance) = current_num.as_mut() {
                    instance.abstract_id = AbstractNumId(number(b"w:val")?);
                }
            }
            b"w:lvlOverride" if !is_empty => {
                override_level = Some(level_index()?);
            }
            b"w:startOverride" => {
                if let (Some(instance), Some(level)) = (current_num.as_mut(), override_level) {
                    instance.start_overrides.insert(level, number(b"w:val")?);
                }
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::NumberingResolver;

    fn outline_model() -> NumberingModel {
        let mut model = NumberingModel::new();
        let abs = model
            .add_abstract(vec![
                Level::numbered(0, NumberFormat::UpperRoman, "%1.").with_indent(720, 360),
                Level::numbered(1, NumberFormat::UpperLetter, "%2.").with_indent(1440, 360),
                Level::numbered(2, NumberFormat::Decimal, "%3.")
                    .with_start(4)
                    .with_justification(Alignment::Right),
            ])
            .unwrap();
        model.add_instance(abs).unwrap();
        let mut overrides = BTreeMap::new();
        overrides.insert(0, 3);
        model.add_instance_with_overrides(abs, overrides).unwrap();
        model.add_list(vec![Level::bullet(0, "\u{2022}")]).unwrap();
        model
    }

    #[test]
    fn test_write_numbering() {
        let root = write_numbering(&outline_model());
        let names: Vec<&str> = root.elements().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec!["w:abstractNum", "w:abstractNum", "w:num", "w:num", "w:num"]
        );

        let first = root.find("w:abstractNum").unwrap();
        assert_eq!(
            first.find("w:multiLevelType").unwrap().attribute("w:val"),
            Some("multilevel")
        );
        let lvl = first.find("w:lvl").unwrap();
        assert_eq!(lvl.find("w:numFmt").unwrap().attribute("w:val"), Some("upperRoman"));
        assert_eq!(lvl.find("w:lvlText").unwrap().attribute("w:val"), Some("%1."));
        let ind = lvl.find("w:pPr").unwrap().find("w:ind").unwrap();
        assert_eq!(ind.attribute("w:left"), Some("720"));
        assert_eq!(ind.attribute("w:hanging"), Some("360"));

        let second_num = root.elements().nth(3).unwrap();
        let start = second_num
            .find("w:lvlOverride")
            .unwrap()
            .find("w:startOverride")
            .unwrap();
        assert_eq!(start.attribute("w:val"), Some("3"));
    }

    #[test]
    fn test_parse_written_numbering() {
        let model = outline_model();
        let bytes = write_numbering(&model).to_part_bytes().unwrap();
        let parsed = parse_numbering(std::str::from_utf8(&bytes).unwrap()).unwrap();
        assert_eq!(parsed, model);

        let mut resolver = NumberingResolver::new(parsed);
        assert_eq!(resolver.advance(NumId(2), 0).unwrap(), "III.");
        assert_eq!(resolver.advance(NumId(1), 2).unwrap(), "4.");
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let xml = r#"<w:numbering xmlns:w="w">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="chineseCounting"/><w:lvlText w:val="%1"/></w:lvl>
  </w:abstractNum>
</w:numbering>"#;
        assert!(matches!(parse_numbering(xml), Err(Error::InvalidDefinition(_))));
    }

    #[test]
    fn test_parse_rejects_oversized_level_index() {
        let xml = r#"<w:numbering xmlns:w="w">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="256"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/></w:lvl>
  </w:abstractNum>
</w:numbering>"#;
        assert!(matches!(parse_numbering(xml), Err(Error::InvalidDefinition(_))));

        let xml = r#"<w:numbering xmlns:w="w">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/></w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/>
    <w:lvlOverride w:ilvl="300"><w:startOverride w:val="2"/></w:lvlOverride>
  </w:num>
</w:numbering>"#;
        assert!(matches!(parse_numbering(xml), Err(Error::InvalidDefinition(_))));
    }

    #[test]
    fn test_parse_rejects_dangling_instance() {
        let xml = r#"<w:numbering xmlns:w="w">
  <w:num w:numId="1"><w:abstractNumId w:val="5"/></w:num>
</w:numbering>"#;
        assert!(parse_numbering(xml).is_err());
    }
}
