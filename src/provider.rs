//! Definition dispatch for template cursors
//!
//! Decides which lookup a cursor position in a template calls for. Class
//! lookups run on the [`StyleEngine`]; component, method and prop lookups go
//! to the collaborators that own those symbol tables.

use crate::engine::{StyleEngine, TemplateDocument};
use crate::extractors::base::Position;
use crate::source::StyleSource;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use tracing::debug;

static EVENT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(mut-bind|capture-catch|capture-bind|bind|catch)")
        .expect("event prefix pattern must compile")
});

static EVENT_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.(user|stop|default)$").expect("event suffix pattern must compile")
});

static WRAPPING_QUOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^['"]|['"]$"#).expect("quote pattern must compile"));

const RESERVED_WORDS: [&str; 2] = ["true", "false"];

/// Tag under the cursor, as reported by the template parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDescriptor {
    pub name: String,
    /// Attribute values keyed by attribute name
    pub attrs: HashMap<String, String>,
    /// Raw attribute source values (quotes included) keyed by attribute name
    pub raw_attrs: HashMap<String, String>,
    /// Attribute the cursor is in, if any
    pub attr_name: String,
    /// Word under the cursor
    pub pos_word: String,
    pub is_on_tag_name: bool,
    pub is_on_attr_name: bool,
    pub is_on_attr_value: bool,
    /// Cursor sits inside a `{{ ... }}` within the attribute value
    pub is_in_interpolation: bool,
}

/// What the template parser found at the cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorContext {
    pub tag: Option<TagDescriptor>,
    /// Text of a `{{ ... }}` under the cursor outside any tag, braces stripped
    pub interpolation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptSymbolKind {
    Method,
    Prop,
}

/// Lookup a cursor position calls for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionTarget {
    Component(String),
    Method(String),
    Prop(String),
    Class(String),
    None,
}

/// A location in any file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub start: Position,
    pub end: Position,
}

/// Resolves custom component tags to their definition file
pub trait ComponentResolver {
    fn resolve_component(&self, tag: &str, template: &Path) -> Option<PathBuf>;
}

/// Script-side symbol table for the template's page or component
pub trait ScriptSymbols {
    fn find_symbol(&self, kind: ScriptSymbolKind, name: &str, template: &Path) -> Vec<Location>;
}

fn is_event_attribute(name: &str) -> bool {
    EVENT_PREFIX.is_match(name) || EVENT_SUFFIX.is_match(name)
}

fn strip_quotes(value: &str) -> String {
    WRAPPING_QUOTES.replace_all(value, "").into_owned()
}

/// Classify the cursor context into a lookup
pub fn classify(ctx: &CursorContext) -> DefinitionTarget {
    let Some(tag) = &ctx.tag else {
        return match &ctx.interpolation {
            Some(text) if !text.trim().is_empty() => DefinitionTarget::Prop(text.trim().to_string()),
            _ => DefinitionTarget::None,
        };
    };

    if tag.is_on_tag_name {
        return DefinitionTarget::Component(tag.name.clone());
    }

    if tag.is_on_attr_name {
        if is_event_attribute(&tag.pos_word) {
            if let Some(method) = tag.attrs.get(&tag.pos_word) {
                return DefinitionTarget::Method(strip_quotes(method));
            }
        }
        return DefinitionTarget::None;
    }

    if !tag.is_on_attr_value {
        return DefinitionTarget::None;
    }

    let word = tag.pos_word.as_str();
    if RESERVED_WORDS.contains(&word) || word.starts_with(|c: char| c.is_ascii_digit()) {
        return DefinitionTarget::None;
    }

    let raw_value = strip_quotes(tag.raw_attrs.get(&tag.attr_name).map_or("", String::as_str));
    let attr = tag.attr_name.as_str();

    if attr.ends_with("class") {
        DefinitionTarget::Class(word.to_string())
    } else if attr.ends_with(".sync") || (raw_value.starts_with("{{") && raw_value.ends_with("}}")) {
        DefinitionTarget::Prop(word.to_string())
    } else if is_event_attribute(attr) || tag.is_in_interpolation {
        DefinitionTarget::Method(word.to_string())
    } else {
        DefinitionTarget::None
    }
}

pub struct DefinitionProvider<'a, S: StyleSource> {
    engine: &'a mut StyleEngine<S>,
    components: &'a dyn ComponentResolver,
    scripts: &'a dyn ScriptSymbols,
}

impl<'a, S: StyleSource> DefinitionProvider<'a, S> {
    pub fn new(
        engine: &'a mut StyleEngine<S>,
        components: &'a dyn ComponentResolver,
        scripts: &'a dyn ScriptSymbols,
    ) -> Self {
        Self {
            engine,
            components,
            scripts,
        }
    }

    /// Definitions for the cursor context, in the order each lookup produces them
    pub fn provide_definition(
        &mut self,
        document: &dyn TemplateDocument,
        position: Position,
        ctx: &CursorContext,
        cancel: Option<&AtomicBool>,
    ) -> Vec<Location> {
        let template = document.file_path();
        let target = classify(ctx);
        debug!("Definition target at {}: {:?}", position, target);

        match target {
            DefinitionTarget::Component(tag) => self
                .components
                .resolve_component(&tag, template)
                .map(|file| Location {
                    file,
                    start: Position::default(),
                    end: Position::default(),
                })
                .into_iter()
                .collect(),
            DefinitionTarget::Method(name) => {
                self.scripts
                    .find_symbol(ScriptSymbolKind::Method, &name, template)
            }
            DefinitionTarget::Prop(name) => {
                self.scripts
                    .find_symbol(ScriptSymbolKind::Prop, &name, template)
            }
            DefinitionTarget::Class(name) => self
                .engine
                .resolve_class_definition(&name, document, position, cancel)
                .into_iter()
                .map(|loc| Location {
                    file: loc.file,
                    start: loc.start,
                    end: loc.end,
                })
                .collect(),
            DefinitionTarget::None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleConfig;
    use crate::engine::TemplateFile;
    use crate::source::testing::MemoryStyleSource;
    use std::cell::RefCell;

    fn value_tag(attr: &str, raw: &str, word: &str) -> CursorContext {
        let mut tag = TagDescriptor {
            name: "view".to_string(),
            attr_name: attr.to_string(),
            pos_word: word.to_string(),
            is_on_attr_value: true,
            ..Default::default()
        };
        tag.attrs.insert(attr.to_string(), strip_quotes(raw));
        tag.raw_attrs.insert(attr.to_string(), raw.to_string());
        CursorContext {
            tag: Some(tag),
            interpolation: None,
        }
    }

    #[test]
    fn test_class_attributes() {
        assert_eq!(
            classify(&value_tag("class", "\"card card__title\"", "card__title")),
            DefinitionTarget::Class("card__title".to_string())
        );
        assert_eq!(
            classify(&value_tag("hover-class", "\"pressed\"", "pressed")),
            DefinitionTarget::Class("pressed".to_string())
        );
    }

    #[test]
    fn test_reserved_words_and_numbers_are_ignored() {
        assert_eq!(classify(&value_tag("class", "\"true\"", "true")), DefinitionTarget::None);
        assert_eq!(classify(&value_tag("class", "\"2col\"", "2col")), DefinitionTarget::None);
    }

    #[test]
    fn test_props_and_methods_in_values() {
        assert_eq!(
            classify(&value_tag("title", "\"{{ heading }}\"", "heading")),
            DefinitionTarget::Prop("heading".to_string())
        );
        assert_eq!(
            classify(&value_tag("value.sync", "\"name\"", "name")),
            DefinitionTarget::Prop("name".to_string())
        );
        assert_eq!(
            classify(&value_tag("bindtap", "\"onTap\"", "onTap")),
            DefinitionTarget::Method("onTap".to_string())
        );
        assert_eq!(
            classify(&value_tag("tap.stop", "\"onTap\"", "onTap")),
            DefinitionTarget::Method("onTap".to_string())
        );
        assert_eq!(classify(&value_tag("src", "\"a.png\"", "a")), DefinitionTarget::None);
    }

    #[test]
    fn test_interpolation_inside_plain_attribute_is_a_method() {
        let mut ctx = value_tag("style", "\"height: {{bottom}}rpx\"", "bottom");
        if let Some(tag) = ctx.tag.as_mut() {
            tag.is_in_interpolation = true;
        }
        assert_eq!(classify(&ctx), DefinitionTarget::Method("bottom".to_string()));
    }

    #[test]
    fn test_event_attribute_name_resolves_its_handler() {
        let mut tag = TagDescriptor {
            name: "button".to_string(),
            pos_word: "catchtap".to_string(),
            is_on_attr_name: true,
            ..Default::default()
        };
        tag.attrs.insert("catchtap".to_string(), "'handleTap'".to_string());
        let ctx = CursorContext {
            tag: Some(tag.clone()),
            interpolation: None,
        };
        assert_eq!(classify(&ctx), DefinitionTarget::Method("handleTap".to_string()));

        tag.pos_word = "class".to_string();
        let ctx = CursorContext {
            tag: Some(tag),
            interpolation: None,
        };
        assert_eq!(classify(&ctx), DefinitionTarget::None);
    }

    #[test]
    fn test_tag_name_and_bare_interpolation() {
        let tag = TagDescriptor {
            name: "my-card".to_string(),
            is_on_tag_name: true,
            ..Default::default()
        };
        assert_eq!(
            classify(&CursorContext {
                tag: Some(tag),
                interpolation: None
            }),
            DefinitionTarget::Component("my-card".to_string())
        );
        assert_eq!(
            classify(&CursorContext {
                tag: None,
                interpolation: Some(" count ".to_string())
            }),
            DefinitionTarget::Prop("count".to_string())
        );
        assert_eq!(classify(&CursorContext::default()), DefinitionTarget::None);
    }

    struct FixedComponents;

    impl ComponentResolver for FixedComponents {
        fn resolve_component(&self, tag: &str, _template: &Path) -> Option<PathBuf> {
            (tag == "my-card").then(|| PathBuf::from("/app/components/my-card/index.wxml"))
        }
    }

    #[derive(Default)]
    struct RecordingScripts {
        calls: RefCell<Vec<(ScriptSymbolKind, String)>>,
    }

    impl ScriptSymbols for RecordingScripts {
        fn find_symbol(&self, kind: ScriptSymbolKind, name: &str, _template: &Path) -> Vec<Location> {
            self.calls.borrow_mut().push((kind, name.to_string()));
            vec![Location {
                file: PathBuf::from("/app/pages/index/index.js"),
                start: Position::new(10, 2),
                end: Position::new(10, 8),
            }]
        }
    }

    #[test]
    fn test_provider_routes_each_target() {
        let source = MemoryStyleSource::new();
        source.write("/app/pages/index/index.wxss", "/* Card */\n.card {}\n");
        let mut engine = StyleEngine::new(source, StyleConfig::default());
        let scripts = RecordingScripts::default();
        let doc = TemplateFile::new("/app/pages/index/index.wxml", Some(PathBuf::from("/app")));
        let mut provider = DefinitionProvider::new(&mut engine, &FixedComponents, &scripts);

        let class_locs = provider.provide_definition(
            &doc,
            Position::new(0, 14),
            &value_tag("class", "\"card\"", "card"),
            None,
        );
        assert_eq!(class_locs.len(), 1);
        assert_eq!(class_locs[0].file, PathBuf::from("/app/pages/index/index.wxss"));
        assert_eq!(class_locs[0].start, Position::new(1, 0));

        let method_locs = provider.provide_definition(
            &doc,
            Position::default(),
            &value_tag("bindtap", "\"onTap\"", "onTap"),
            None,
        );
        assert_eq!(method_locs.len(), 1);

        let component = TagDescriptor {
            name: "my-card".to_string(),
            is_on_tag_name: true,
            ..Default::default()
        };
        let component_locs = provider.provide_definition(
            &doc,
            Position::default(),
            &CursorContext {
                tag: Some(component),
                interpolation: None,
            },
            None,
        );
        assert_eq!(
            component_locs,
            vec![Location {
                file: PathBuf::from("/app/components/my-card/index.wxml"),
                start: Position::new(0, 0),
                end: Position::new(0, 0),
            }]
        );

        assert_eq!(
            scripts.calls.borrow().as_slice(),
            &[(ScriptSymbolKind::Method, "onTap".to_string())]
        );
    }
}
