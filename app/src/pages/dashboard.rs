use serde::Serialize;

const SHIBA_INU: &str = "The Shiba Inu is the smallest of the six original and distinct spitz breeds of dog \
from Japan. A small, agile dog that copes very well with mountainous terrain, the Shiba Inu was \
originally bred for hunting.";

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: &'static str,
    pub long_text: &'static str,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self { title: "Dashboard", long_text: SHIBA_INU }
    }
}
