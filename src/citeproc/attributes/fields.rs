//! Declared field operations.
//!
//! Each type that holds [`Attributes`] keeps one [`FieldTable`], built once
//! (usually in a `once_cell::sync::Lazy` static) and shared by every
//! instance. Declaring a field registers up to four named operations:
//!
//! | Name | Operation |
//! |------|-----------|
//! | `container_title` | reader |
//! | `container_title=` | writer |
//! | `container_title?` | predicate (predicated fields only) |
//! | `has_container_title?` | alias of the predicate |
//!
//! Declarations never replace an operation that is already registered, so a
//! type can define a custom reader first and declare the field afterwards.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::spec::{method_name, FieldDescriptor, FieldSpec};
use super::{AttributeValue, Attributes, Key, MergeSource};
use crate::error::{AttributeError, Result};

pub type Reader = Arc<dyn Fn(&mut Attributes) -> Option<Value> + Send + Sync>;
pub type Writer = Arc<dyn Fn(&mut Attributes, Value) + Send + Sync>;
pub type Predicate = Arc<dyn Fn(&Attributes) -> bool + Send + Sync>;

/// A named operation in a [`FieldTable`].
#[derive(Clone)]
pub enum Operation {
    Reader(Reader),
    Writer(Writer),
    Predicate(Predicate),
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Reader(_) => f.write_str("Reader"),
            Operation::Writer(_) => f.write_str("Writer"),
            Operation::Predicate(_) => f.write_str("Predicate"),
        }
    }
}

/// Registry of the field operations of one type.
#[derive(Debug, Default)]
pub struct FieldTable {
    operations: IndexMap<String, Operation>,
    descriptors: IndexMap<String, FieldDescriptor>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reader and a writer for each field.
    ///
    /// # Panics
    ///
    /// If a field name yields no method name.
    pub fn declare_fields<I, S>(&mut self, specs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldSpec>,
    {
        for spec in specs {
            self.declare_field(spec.into(), false);
        }
        self
    }

    /// Register a reader, a writer, a predicate and its `has_` alias for each
    /// field.
    ///
    /// # Panics
    ///
    /// If a field name yields no method name.
    pub fn declare_predicated_fields<I, S>(&mut self, specs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldSpec>,
    {
        for spec in specs {
            self.declare_field(spec.into(), true);
        }
        self
    }

    /// Register the operations of a single field, keeping any that exist.
    ///
    /// # Panics
    ///
    /// If the field name yields no method name.
    pub fn declare_field(&mut self, spec: FieldSpec, predicate: bool) -> &mut Self {
        let descriptor = FieldDescriptor::new(spec, predicate);
        let method = descriptor.method().to_owned();

        self.operations
            .entry(method.clone())
            .or_insert_with(|| Operation::Reader(generated_reader(&descriptor)));
        self.operations
            .entry(format!("{method}="))
            .or_insert_with(|| Operation::Writer(generated_writer(&descriptor)));

        if predicate {
            let predicate_id = format!("{method}?");
            let current = self
                .operations
                .entry(predicate_id.clone())
                .or_insert_with(|| Operation::Predicate(generated_predicate(&descriptor)))
                .clone();
            self.operations
                .entry(format!("has_{predicate_id}"))
                .or_insert(current);
        }

        // A later predicated declaration upgrades the flag; key and default stay.
        let declared = self.descriptors.entry(method).or_insert(descriptor);
        if predicate {
            declared.enable_predicate();
        }
        self
    }

    /// Register a hand-written reader under `name`.
    pub fn define_reader<F>(&mut self, name: &str, reader: F) -> &mut Self
    where
        F: Fn(&mut Attributes) -> Option<Value> + Send + Sync + 'static,
    {
        self.operations
            .insert(method_name(name), Operation::Reader(Arc::new(reader)));
        self
    }

    /// Register a hand-written writer for `name` (stored as `name=`).
    pub fn define_writer<F>(&mut self, name: &str, writer: F) -> &mut Self
    where
        F: Fn(&mut Attributes, Value) + Send + Sync + 'static,
    {
        self.operations.insert(
            format!("{}=", method_name(name)),
            Operation::Writer(Arc::new(writer)),
        );
        self
    }

    /// Register a hand-written predicate for `name` (stored as `name?`).
    pub fn define_predicate<F>(&mut self, name: &str, predicate: F) -> &mut Self
    where
        F: Fn(&Attributes) -> bool + Send + Sync + 'static,
    {
        self.operations.insert(
            format!("{}?", method_name(name)),
            Operation::Predicate(Arc::new(predicate)),
        );
        self
    }

    /// Whether an operation is registered under the exact name, e.g.
    /// `"title"`, `"title="` or `"has_title?"`.
    pub fn responds_to(&self, operation: &str) -> bool {
        self.operations.contains_key(operation)
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn descriptor(&self, field: &str) -> Option<&FieldDescriptor> {
        self.descriptors.get(&method_name(field))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.descriptors.values()
    }

    /// Run the reader for `field`.
    pub fn read(&self, attributes: &mut Attributes, field: &str) -> Result<Option<Value>> {
        match self.lookup(method_name(field))? {
            Operation::Reader(reader) => Ok(reader(attributes)),
            _ => Err(unknown(method_name(field))),
        }
    }

    /// Run the writer for `field`.
    pub fn write(&self, attributes: &mut Attributes, field: &str, value: Value) -> Result<()> {
        match self.lookup(format!("{}=", method_name(field)))? {
            Operation::Writer(writer) => {
                writer(attributes, value);
                Ok(())
            }
            _ => Err(unknown(format!("{}=", method_name(field)))),
        }
    }

    /// Run the predicate for `field` (`field?`).
    pub fn test(&self, attributes: &Attributes, field: &str) -> Result<bool> {
        self.run_predicate(attributes, format!("{}?", method_name(field)))
    }

    /// Run the `has_field?` alias.
    pub fn has(&self, attributes: &Attributes, field: &str) -> Result<bool> {
        self.run_predicate(attributes, format!("has_{}?", method_name(field)))
    }

    fn run_predicate(&self, attributes: &Attributes, name: String) -> Result<bool> {
        match self.lookup(name.clone())? {
            Operation::Predicate(predicate) => Ok(predicate(attributes)),
            _ => Err(unknown(name)),
        }
    }

    fn lookup(&self, name: String) -> Result<&Operation> {
        self.operations.get(&name).ok_or_else(|| unknown(name))
    }
}

fn unknown(name: String) -> AttributeError {
    AttributeError::UnknownOperation { name }
}

fn generated_reader(descriptor: &FieldDescriptor) -> Reader {
    let key = descriptor.key().clone();
    match descriptor.default().cloned() {
        Some(default) => Arc::new(move |attributes: &mut Attributes| {
            Some(attributes.fetch_or_store(key.clone(), || default.clone()).clone())
        }),
        None => Arc::new(move |attributes: &mut Attributes| attributes.get(&key).cloned()),
    }
}

fn generated_writer(descriptor: &FieldDescriptor) -> Writer {
    let key = descriptor.key().clone();
    Arc::new(move |attributes: &mut Attributes, value| attributes.store(key.clone(), value))
}

fn generated_predicate(descriptor: &FieldDescriptor) -> Predicate {
    let key = descriptor.key().clone();
    Arc::new(move |attributes: &Attributes| {
        attributes.get(&key).is_some_and(|value| !value.is_falsy())
    })
}

/// A type built around an [`Attributes`] container and a [`FieldTable`].
///
/// ```ignore
/// static NAME_FIELDS: Lazy<FieldTable> = Lazy::new(|| {
///     let mut table = FieldTable::new();
///     table
///         .declare_fields(["family", "given", "suffix"])
///         .declare_predicated_fields(["comma-suffix", "static-ordering"]);
///     table
/// });
///
/// impl HasAttributes for Name {
///     fn attributes(&self) -> &Attributes { &self.attributes }
///     fn attributes_mut(&mut self) -> &mut Attributes { &mut self.attributes }
///     fn field_table() -> &'static FieldTable { &NAME_FIELDS }
/// }
/// ```
pub trait HasAttributes: Sized {
    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    fn field_table() -> &'static FieldTable;

    /// Build an instance from `parameters`, or `None` if they can't be merged.
    fn create(parameters: impl Into<MergeSource>) -> Option<Self>
    where
        Self: Default,
    {
        match Self::try_create(parameters) {
            Ok(instance) => Some(instance),
            Err(err) => {
                debug!(error = %err, "discarding instance that failed to merge");
                None
            }
        }
    }

    /// Build an instance from `parameters`, propagating merge failures.
    fn try_create(parameters: impl Into<MergeSource>) -> Result<Self>
    where
        Self: Default,
    {
        let mut instance = Self::default();
        instance.merge(parameters)?;
        Ok(instance)
    }

    fn merge(&mut self, source: impl Into<MergeSource>) -> Result<&mut Self> {
        self.attributes_mut().merge(source)?;
        Ok(self)
    }

    fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.attributes().get(key)
    }

    fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        self.attributes_mut().set(key, value);
    }

    /// The declared (or custom) reader for `field`.
    fn field(&mut self, field: &str) -> Result<Option<Value>> {
        Self::field_table().read(self.attributes_mut(), field)
    }

    /// The declared (or custom) writer for `field`.
    fn set_field(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        Self::field_table().write(self.attributes_mut(), field, value.into())
    }

    /// The `field?` predicate.
    fn test_field(&self, field: &str) -> Result<bool> {
        Self::field_table().test(self.attributes(), field)
    }

    /// The `has_field?` predicate alias.
    fn has_field(&self, field: &str) -> Result<bool> {
        Self::field_table().has(self.attributes(), field)
    }
}
