use crate::{core::interpreter::Interpreter, err, error::LexisError};
use std::{collections::HashMap, sync::Arc};

/// Registry of interchangeable implementations of a single capability,
/// keyed by provider id.
pub struct ProviderFactory<T: ?Sized>(HashMap<&'static str, Arc<T>>);

impl<T: ?Sized> Default for ProviderFactory<T> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<T: ?Sized> ProviderFactory<T> {
    pub fn register(&mut self, id: &'static str, provider: Arc<T>) {
        self.0.insert(id, provider);
    }

    pub fn get_provider(&self, id: &str) -> Result<Arc<T>, LexisError> {
        match self.0.get(id) {
            Some(provider) => Ok(provider.clone()),
            None => err!(InvalidProvider, "{id}"),
        }
    }

    pub fn list_provider_ids(&self) -> Vec<&'static str> {
        self.0.keys().copied().collect()
    }
}

pub type InterpreterProvider = ProviderFactory<dyn Interpreter + Send + Sync>;
