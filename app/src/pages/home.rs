//! Home page: language and edition pickers over a surah table

use crate::client::{QuranClient, Transport};
use crate::error::RequestError;
use crate::models::{Direction, Edition, EditionFormat, EditionType, SurahReference};
use crate::table::{DataTable, PageView, Sort, TableRow, DEFAULT_PAGE_SIZE};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_LANGUAGE: &str = "ar";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

impl LanguageOption {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: language_name(code).unwrap_or(code).to_string(),
        }
    }
}

/// English display name for the language codes the upstream serves editions in
pub fn language_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "am" => "Amharic",
        "ar" => "Arabic",
        "az" => "Azerbaijani",
        "ber" => "Berber",
        "bn" => "Bangla",
        "bs" => "Bosnian",
        "cs" => "Czech",
        "de" => "German",
        "dv" => "Divehi",
        "en" => "English",
        "es" => "Spanish",
        "fa" => "Persian",
        "fr" => "French",
        "ha" => "Hausa",
        "hi" => "Hindi",
        "id" => "Indonesian",
        "it" => "Italian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "ku" => "Kurdish",
        "ml" => "Malayalam",
        "ms" => "Malay",
        "nl" => "Dutch",
        "no" => "Norwegian",
        "pl" => "Polish",
        "ps" => "Pashto",
        "pt" => "Portuguese",
        "ro" => "Romanian",
        "ru" => "Russian",
        "sd" => "Sindhi",
        "so" => "Somali",
        "sq" => "Albanian",
        "sv" => "Swedish",
        "sw" => "Swahili",
        "ta" => "Tamil",
        "tg" => "Tajik",
        "th" => "Thai",
        "tr" => "Turkish",
        "tt" => "Tatar",
        "ug" => "Uyghur",
        "ur" => "Urdu",
        "uz" => "Uzbek",
        "zh" => "Chinese",
        _ => return None,
    };
    Some(name)
}

/// Shown until the first editions fetch lands
fn seed_edition() -> Edition {
    Edition {
        identifier: "ar.muyassar".to_string(),
        language: "ar".to_string(),
        name: "تفسير المیسر".to_string(),
        english_name: "King Fahad Quran Complex".to_string(),
        format: EditionFormat::Text,
        edition_type: EditionType::Tafsir,
        direction: Some(Direction::Rtl),
    }
}

/// Serializable snapshot of the home page
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub languages: Vec<LanguageOption>,
    pub selected_language: String,
    pub editions: Vec<Edition>,
    pub selected_edition: Option<String>,
    pub columns: &'static [&'static str],
    pub filter: String,
    pub sort: Option<Sort>,
    pub table: PageView<SurahReference>,
    pub loaded_at: Option<DateTime<Utc>>,
    pub alerts: Vec<String>,
}

pub struct HomePage {
    languages: Arc<[String]>,
    selected_language: String,
    editions: Arc<[Edition]>,
    selected_edition: Option<String>,
    table: DataTable<SurahReference>,
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            languages: Arc::from(Vec::new()),
            selected_language: DEFAULT_LANGUAGE.to_string(),
            editions: Arc::from(vec![seed_edition()]),
            selected_edition: None,
            table: DataTable::new(DEFAULT_PAGE_SIZE),
        }
    }

    /// Start from another language; nothing is fetched until `mount`
    pub fn with_language(lang: &str) -> Self {
        Self { selected_language: lang.to_string(), ..Self::new() }
    }

    /// Load languages, editions and surah metadata concurrently.
    ///
    /// Each successful result replaces its piece of state; failed ones leave it
    /// untouched and are returned.
    pub async fn mount<T: Transport>(&mut self, client: &QuranClient<T>) -> Vec<RequestError> {
        let lang = self.selected_language.clone();
        let (languages, editions, meta) = tokio::join!(
            client.languages(),
            client.editions_for_language(&lang),
            client.meta(),
        );

        let mut alerts = Vec::new();
        match languages {
            Ok(languages) => self.languages = Arc::from(languages),
            Err(e) => alerts.push(e),
        }
        match editions {
            Ok(editions) => self.editions = Arc::from(editions),
            Err(e) => alerts.push(e),
        }
        match meta {
            Ok(meta) => self.table.replace_data(meta.surahs.references),
            Err(e) => alerts.push(e),
        }

        for alert in &alerts {
            warn!(error = %alert, "Home page fetch failed");
        }
        alerts
    }

    pub async fn select_language<T: Transport>(
        &mut self,
        lang: &str,
        client: &QuranClient<T>,
    ) -> Result<(), RequestError> {
        self.selected_language = lang.to_string();
        self.load_editions(client).await
    }

    pub async fn load_editions<T: Transport>(&mut self, client: &QuranClient<T>) -> Result<(), RequestError> {
        let editions = client.editions_for_language(&self.selected_language).await?;
        self.editions = Arc::from(editions);
        Ok(())
    }

    pub fn select_edition(&mut self, identifier: &str) {
        debug!(edition = identifier, "Edition selected");
        self.selected_edition = Some(identifier.to_string());
    }

    pub fn apply_filter(&mut self, raw: &str) {
        self.table.set_filter(raw);
    }

    pub fn languages(&self) -> Arc<[String]> {
        Arc::clone(&self.languages)
    }

    pub fn selected_language(&self) -> &str {
        &self.selected_language
    }

    pub fn editions(&self) -> Arc<[Edition]> {
        Arc::clone(&self.editions)
    }

    pub fn selected_edition(&self) -> Option<&str> {
        self.selected_edition.as_deref()
    }

    pub fn table(&self) -> &DataTable<SurahReference> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<SurahReference> {
        &mut self.table
    }

    pub fn view(&self, alerts: &[RequestError]) -> HomeView {
        HomeView {
            languages: self.languages.iter().map(|code| LanguageOption::new(code)).collect(),
            selected_language: self.selected_language.clone(),
            editions: self.editions.to_vec(),
            selected_edition: self.selected_edition.clone(),
            columns: SurahReference::COLUMNS,
            filter: self.table.filter().to_string(),
            sort: self.table.sort().cloned(),
            table: self.table.page(),
            loaded_at: self.table.loaded_at(),
            alerts: alerts.iter().map(|e| e.to_string()).collect(),
        }
    }
}
