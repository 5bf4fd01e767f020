//! Identifier naming for generated request messages.
//!
//! `Name` holds an identifier as a list of lowercase words so it can be
//! re-cased for any target. `Namer` is the target-language capability the
//! builder is written against; `JavaNamer` is the shipped target.

use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::LazyLock;

use crate::model::Primitive;

/// Java reserved words that cannot be used as identifiers.
pub static JAVA_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "abstract",
        "assert",
        "boolean",
        "break",
        "byte",
        "case",
        "catch",
        "char",
        "class",
        "const",
        "continue",
        "default",
        "do",
        "double",
        "else",
        "enum",
        "extends",
        "false",
        "final",
        "finally",
        "float",
        "for",
        "goto",
        "if",
        "implements",
        "import",
        "instanceof",
        "int",
        "interface",
        "long",
        "native",
        "new",
        "null",
        "package",
        "private",
        "protected",
        "public",
        "return",
        "short",
        "static",
        "strictfp",
        "super",
        "switch",
        "synchronized",
        "this",
        "throw",
        "throws",
        "transient",
        "true",
        "try",
        "var",
        "void",
        "volatile",
        "while",
    ]
    .into_iter()
    .collect()
});

/// An identifier split into lowercase words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    words: Vec<String>,
}

impl Name {
    /// Split an identifier written in any casing.
    ///
    /// Word boundaries are non-alphanumeric characters, a lower-to-upper
    /// transition (`prettyPrint`), a digit-to-upper transition (`ipv4Address`)
    /// and the last capital of an acronym run (`HTTPRequest`).
    pub fn any_camel(raw: &str) -> Self {
        let chars: Vec<char> = raw.chars().collect();
        let mut words = Vec::new();
        let mut current = String::new();
        let mut prev: Option<char> = None;

        for (i, &c) in chars.iter().enumerate() {
            if !c.is_alphanumeric() {
                flush_word(&mut words, &mut current);
                prev = None;
                continue;
            }
            if c.is_uppercase() && !current.is_empty() {
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                let boundary = prev.is_some_and(|p| {
                    p.is_lowercase() || p.is_ascii_digit() || (p.is_uppercase() && next_is_lower)
                });
                if boundary {
                    flush_word(&mut words, &mut current);
                }
            }
            current.extend(c.to_lowercase());
            prev = Some(c);
        }
        flush_word(&mut words, &mut current);

        Self { words }
    }

    /// Build a name from words that are already split.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            words: words
                .iter()
                .map(|w| w.as_ref().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn join(mut self, other: &Name) -> Self {
        self.words.extend(other.words.iter().cloned());
        self
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn to_lower_camel(&self) -> String {
        let mut result = String::new();
        for (i, word) in self.words.iter().enumerate() {
            if i == 0 {
                result.push_str(word);
            } else {
                result.push_str(&capitalize_first(word));
            }
        }
        result
    }

    pub fn to_upper_camel(&self) -> String {
        self.words.iter().map(|w| capitalize_first(w)).collect()
    }
}

fn flush_word(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Naive English singular of a collection word (`addresses` -> `address`).
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{stem}y")
    } else if word.ends_with("sses") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Whether a setter writes one value or a whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    NotRepeated,
    Repeated,
}

impl Cardinality {
    pub fn of_repeated(repeated: bool) -> Self {
        if repeated {
            Cardinality::Repeated
        } else {
            Cardinality::NotRepeated
        }
    }
}

/// Target-language naming and type vocabulary.
///
/// Everything the lowering stage needs to know about the generated surface
/// goes through this trait, so adding a target never touches the builder.
pub trait Namer: Debug + Send + Sync {
    /// Words no generated identifier may take verbatim.
    fn reserved_words(&self) -> Vec<&'static str>;

    fn private_field_name(&self, name: &Name) -> String {
        name.to_lower_camel()
    }

    fn public_class_name(&self, name: &Name) -> String {
        name.to_upper_camel()
    }

    fn getter_name(&self, name: &Name) -> String;

    fn setter_name(&self, name: &Name, cardinality: Cardinality) -> String;

    fn adder_name(&self, name: &Name) -> String;

    /// Split free text into doc comment lines safe for the target.
    fn doc_lines(&self, text: &str) -> Vec<String>;

    /// Built-in type name for a primitive. Built-ins never need an import.
    fn primitive_type_name(&self, primitive: Primitive) -> &'static str;

    /// Fully qualified name of the list container.
    fn list_type(&self) -> &'static str;

    /// Fully qualified name of the map container.
    fn map_type(&self) -> &'static str;

    fn generic_type_name(&self, container: &str, args: &[&str]) -> String;
}

/// Naming for Java request classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaNamer;

impl Namer for JavaNamer {
    fn reserved_words(&self) -> Vec<&'static str> {
        let mut words: Vec<&'static str> = JAVA_RESERVED_WORDS.iter().copied().collect();
        // Generated request classes carry a nested `Builder`.
        words.push("Builder");
        words.sort_unstable();
        words
    }

    fn getter_name(&self, name: &Name) -> String {
        format!("get{}", name.to_upper_camel())
    }

    fn setter_name(&self, name: &Name, cardinality: Cardinality) -> String {
        match cardinality {
            Cardinality::NotRepeated => format!("set{}", name.to_upper_camel()),
            Cardinality::Repeated => format!("addAll{}", name.to_upper_camel()),
        }
    }

    fn adder_name(&self, name: &Name) -> String {
        format!("add{}", name.to_upper_camel())
    }

    fn doc_lines(&self, text: &str) -> Vec<String> {
        let mut lines: Vec<String> = text
            .lines()
            .map(|line| line.trim_end().replace("*/", "*&#47;"))
            .collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let leading = lines.iter().take_while(|l| l.is_empty()).count();
        lines.drain(..leading);
        lines
    }

    fn primitive_type_name(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String | Primitive::Bytes => "String",
            Primitive::Int32 => "Integer",
            Primitive::Int64 => "Long",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Bool => "Boolean",
            Primitive::Any => "Object",
        }
    }

    fn list_type(&self) -> &'static str {
        "java.util.List"
    }

    fn map_type(&self) -> &'static str {
        "java.util.Map"
    }

    fn generic_type_name(&self, container: &str, args: &[&str]) -> String {
        format!("{container}<{}>", args.join(", "))
    }
}
