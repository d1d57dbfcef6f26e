use indexmap::IndexMap;

/// Parameters forwarded to the widget embed call.
///
/// Values are stored as pre-formatted JavaScript literal text and pasted into
/// the generated document verbatim. The store is a code-generation seam, not
/// a data model: nothing is escaped or validated here. Setting a name again
/// replaces its value but keeps its original position in the rendered block.
#[derive(Debug, Clone, Default)]
pub struct WidgetParams {
    entries: IndexMap<String, String>,
}

impl WidgetParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a string parameter, wrapped in single quotes.
    ///
    /// Embedded quotes are not escaped; callers must keep the value safe for
    /// direct embedding in script source.
    pub fn set_str(&mut self, name: impl Into<String>, value: &str) -> &mut Self {
        self.entries.insert(name.into(), format!("'{value}'"));
        self
    }

    /// Store a boolean parameter as the bare literal `true` or `false`.
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.entries.insert(name.into(), value.to_string());
        self
    }

    /// Store an integer parameter as bare decimal text.
    pub fn set_int(&mut self, name: impl Into<String>, value: i64) -> &mut Self {
        self.entries.insert(name.into(), value.to_string());
        self
    }

    /// Store a parameter whose value is JavaScript source, used verbatim.
    ///
    /// This is the escape hatch for object- and function-valued widget
    /// options; the caller is responsible for syntactic validity.
    pub fn set_raw(&mut self, name: impl Into<String>, code: impl Into<String>) -> &mut Self {
        self.entries.insert(name.into(), code.into());
        self
    }

    /// Remove every stored parameter.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The literal text stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the `name: value,` block substituted into the document
    /// template, one parameter per line in insertion order.
    pub fn render_block(&self) -> String {
        let mut block = String::new();
        for (name, literal) in &self.entries {
            block.push_str(name);
            block.push_str(": ");
            block.push_str(literal);
            block.push_str(",\n");
        }
        block
    }
}
