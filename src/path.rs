//! Mapping from a resource name to its REST paths.

/// Computes the get/list/create/update paths for one resource.
///
/// Paths are relative to the client's base URL and carry no `.json`
/// suffix; the service appends it when building the request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathHandler {
    base: &'static str,
    create: Option<&'static str>,
}

impl PathHandler {
    /// Paths rooted at `base` for every operation.
    pub const fn new(base: &'static str) -> Self {
        Self { base, create: None }
    }

    /// Use a different endpoint for creation only.
    pub const fn with_create(mut self, create: &'static str) -> Self {
        self.create = Some(create);
        self
    }

    /// The logical resource name.
    pub fn base(&self) -> &'static str {
        self.base
    }

    pub fn get(&self, id: u64) -> String {
        format!("{}/{}", self.base, id)
    }

    pub fn list(&self) -> String {
        self.base.to_string()
    }

    pub fn create(&self) -> String {
        self.create.unwrap_or(self.base).to_string()
    }

    pub fn update(&self, id: u64) -> String {
        format!("{}/{}", self.base, id)
    }
}
