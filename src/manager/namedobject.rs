use serde::Deserialize;

/// JSON 物件中只取 `name` 欄位，作為 manager 的鍵。
#[derive(Clone, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}
