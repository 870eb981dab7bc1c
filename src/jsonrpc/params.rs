//! Parameter extraction.
//!
//! Clients disagree on how a single structured argument is sent: some use a
//! named object (`"params": {"a": 1}`), others wrap it positionally
//! (`"params": [{"a": 1}]`). Both are accepted, object first.

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::jsonrpc::types::RpcRequest;

/// Decode the request's `params` into `target`.
///
/// Absent params leave `target` untouched. When the object decode fails the
/// payload is read as an array and its first element decoded instead; the
/// error of that second attempt is the one reported.
pub fn read_params<T>(request: &RpcRequest, target: &mut T) -> Result<(), serde_json::Error>
where
    T: DeserializeOwned,
{
    let Some(raw) = request.params.as_deref() else {
        return Ok(());
    };

    if let Ok(value) = serde_json::from_str::<T>(raw.get()) {
        *target = value;
        return Ok(());
    }

    // Extra elements are ignored and an empty array decodes nothing.
    let items: Vec<&RawValue> = serde_json::from_str(raw.get())?;
    if let Some(first) = items.first() {
        *target = serde_json::from_str(first.get())?;
    }
    Ok(())
}

impl RpcRequest {
    /// Decode `params` into a fresh `T`, starting from `T::default()`.
    pub fn params_as<T>(&self) -> Result<T, serde_json::Error>
    where
        T: DeserializeOwned + Default,
    {
        let mut target = T::default();
        read_params(self, &mut target)?;
        Ok(target)
    }
}
