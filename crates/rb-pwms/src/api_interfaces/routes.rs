use std::collections::HashMap;

use serde::Deserialize;

/// Raw route listing payload from the PWMS service.
#[derive(Deserialize)]
pub struct ResponseData {
    pub enderecos: AddressList,
}

/// The service serializes the same logical list either as a JSON array or as
/// an object keyed by arbitrary strings, depending on unspecified server-side
/// conditions. Variants are tried in declaration order, so the array shape is
/// attempted first and the keyed shape is the fallback.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum AddressList {
    Listed(Vec<RouteEntry>),
    Keyed(HashMap<String, RouteEntry>),
}

impl AddressList {
    /// Entries in the order encountered. Map iteration order carries no
    /// meaning in the keyed shape; no sort is applied here.
    pub fn into_entries(self) -> Vec<RouteEntry> {
        match self {
            AddressList::Listed(entries) => entries,
            AddressList::Keyed(map) => map.into_values().collect(),
        }
    }
}

/// Raw address entry from the API. The `zip` field was relaxed from required
/// to optional by the upstream without explanation; treated as optional here.
#[derive(Deserialize)]
pub struct RouteEntry {
    pub endereco: String,
    pub cidade: String,
    pub estado: String,
    pub zip: Option<String>,
    pub servico: String,
    pub frequencia: String,
}
