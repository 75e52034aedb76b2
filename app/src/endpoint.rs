//! Request builder for the alquran.cloud resource paths
//!
//! Every upstream resource is one `Endpoint` variant. The URL is the base, the
//! resource path and the path segments joined with `/`, in declared order and
//! without escaping. Section endpoints and the edition listing may carry a query.

use serde::{Deserialize, Serialize};

/// Window into the ayahs of a section (`?offset=3&limit=10` yields ayahs 4-13)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset: Some(offset), limit: Some(limit) }
    }

    pub fn is_empty(&self) -> bool {
        self.offset.is_none() && self.limit.is_none()
    }
}

/// Narrows the all-editions listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionFilter {
    pub format: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "type")]
    pub edition_type: Option<String>,
}

impl EditionFilter {
    pub fn is_empty(&self) -> bool {
        self.format.is_none() && self.language.is_none() && self.edition_type.is_none()
    }
}

/// Structural divisions that share the `/{kind}/{number}/{edition}` shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Juz,
    Manzil,
    Ruku,
    Page,
    HizbQuarter,
}

impl SectionKind {
    pub fn resource(&self) -> &'static str {
        match self {
            SectionKind::Juz => "/juz",
            SectionKind::Manzil => "/manzil",
            SectionKind::Ruku => "/ruku",
            SectionKind::Page => "/page",
            SectionKind::HizbQuarter => "/hizbQuarter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Editions(EditionFilter),
    Languages,
    EditionsForLanguage(String),
    EditionTypes,
    EditionsForType(String),
    Formats,
    EditionsForFormat(String),
    Quran(String),
    Surahs,
    Surah { surah: u32, edition: String },
    SurahEditions { surah: u32, editions: String },
    Ayah { reference: String, edition: String },
    AyahEditions { reference: String, editions: String },
    Search { keyword: String, surah: String, edition_or_language: String },
    Section { kind: SectionKind, number: u32, edition: String, window: Pagination },
    Sajda(String),
    Meta,
}

impl Endpoint {
    pub fn section(kind: SectionKind, number: u32, edition: impl Into<String>) -> Self {
        Endpoint::Section { kind, number, edition: edition.into(), window: Pagination::default() }
    }

    /// Attach an offset/limit window; ignored by endpoints that do not page
    pub fn with_window(mut self, pagination: Pagination) -> Self {
        if let Endpoint::Section { ref mut window, .. } = self {
            *window = pagination;
        }
        self
    }

    /// Fixed resource path, starting with `/`
    pub fn resource(&self) -> &'static str {
        match self {
            Endpoint::Editions(_) => "/edition",
            Endpoint::Languages => "/edition/language",
            Endpoint::EditionsForLanguage(_) => "/edition/language",
            Endpoint::EditionTypes | Endpoint::EditionsForType(_) => "/type",
            Endpoint::Formats | Endpoint::EditionsForFormat(_) => "/format",
            Endpoint::Quran(_) => "/quran",
            Endpoint::Surahs | Endpoint::Surah { .. } | Endpoint::SurahEditions { .. } => "/surah",
            Endpoint::Ayah { .. } | Endpoint::AyahEditions { .. } => "/ayah",
            Endpoint::Search { .. } => "/search",
            Endpoint::Section { kind, .. } => kind.resource(),
            Endpoint::Sajda(_) => "/sajda",
            Endpoint::Meta => "/meta",
        }
    }

    /// Caller-supplied path segments in declared order
    pub fn segments(&self) -> Vec<String> {
        match self {
            Endpoint::Editions(_)
            | Endpoint::Languages
            | Endpoint::EditionTypes
            | Endpoint::Formats
            | Endpoint::Surahs
            | Endpoint::Meta => Vec::new(),
            Endpoint::EditionsForLanguage(lang) => vec![lang.clone()],
            Endpoint::EditionsForType(edition_type) => vec![edition_type.clone()],
            Endpoint::EditionsForFormat(format) => vec![format.clone()],
            Endpoint::Quran(edition) | Endpoint::Sajda(edition) => vec![edition.clone()],
            Endpoint::Surah { surah, edition } => vec![surah.to_string(), edition.clone()],
            Endpoint::SurahEditions { surah, editions } => {
                vec![surah.to_string(), "editions".to_string(), editions.clone()]
            }
            Endpoint::Ayah { reference, edition } => vec![reference.clone(), edition.clone()],
            Endpoint::AyahEditions { reference, editions } => {
                vec![reference.clone(), "edition".to_string(), editions.clone()]
            }
            Endpoint::Search { keyword, surah, edition_or_language } => {
                vec![keyword.clone(), surah.clone(), edition_or_language.clone()]
            }
            Endpoint::Section { number, edition, .. } => vec![number.to_string(), edition.clone()],
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        match self {
            Endpoint::Editions(filter) => {
                if let Some(format) = &filter.format {
                    query.push(("format", format.clone()));
                }
                if let Some(language) = &filter.language {
                    query.push(("language", language.clone()));
                }
                if let Some(edition_type) = &filter.edition_type {
                    query.push(("type", edition_type.clone()));
                }
            }
            Endpoint::Section { window, .. } => {
                if let Some(offset) = window.offset {
                    query.push(("offset", offset.to_string()));
                }
                if let Some(limit) = window.limit {
                    query.push(("limit", limit.to_string()));
                }
            }
            _ => {}
        }
        query
    }

    /// Resource path plus segments, e.g. `/surah/36/en.asad`
    pub fn path(&self) -> String {
        let mut path = self.resource().to_string();
        for segment in self.segments() {
            path.push('/');
            path.push_str(&segment);
        }
        path
    }

    pub fn url(&self, base: &str) -> String {
        let mut url = format!("{}{}", base, self.path());
        let query = self.query();
        if !query.is_empty() {
            let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }
}
