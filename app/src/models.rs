//! Response schemas for the alquran.cloud API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every upstream response is wrapped as `{ code, status, data }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub status: String,
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditionFormat {
    Text,
    Audio,
}

impl EditionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditionFormat::Text => "text",
            EditionFormat::Audio => "audio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditionType {
    Tafsir,
    Translation,
    Quran,
    Transliteration,
    Versebyverse,
}

impl EditionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditionType::Tafsir => "tafsir",
            EditionType::Translation => "translation",
            EditionType::Quran => "quran",
            EditionType::Transliteration => "transliteration",
            EditionType::Versebyverse => "versebyverse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edition {
    pub identifier: String,
    pub language: String,
    pub name: String,
    pub english_name: String,
    pub format: EditionFormat,
    #[serde(rename = "type")]
    pub edition_type: EditionType,
    /// Null for audio editions
    #[serde(default)]
    pub direction: Option<Direction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevelationType {
    Meccan,
    Medinan,
}

impl RevelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevelationType::Meccan => "Meccan",
            RevelationType::Medinan => "Medinan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurahReference {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub number_of_ayahs: u32,
    pub revelation_type: RevelationType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SajdaDetail {
    pub id: u32,
    pub recommended: bool,
    pub obligatory: bool,
}

/// `false` for ordinary ayahs, an object for sajda ayahs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sajda {
    Flag(bool),
    Detail(SajdaDetail),
}

impl Sajda {
    pub fn is_sajda(&self) -> bool {
        match self {
            Sajda::Flag(flag) => *flag,
            Sajda::Detail(_) => true,
        }
    }
}

/// Position fields are absent from search matches, hence optional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    pub number: u32,
    pub text: String,
    #[serde(default)]
    pub number_in_surah: Option<u32>,
    #[serde(default)]
    pub juz: Option<u32>,
    #[serde(default)]
    pub manzil: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub ruku: Option<u32>,
    #[serde(default)]
    pub hizb_quarter: Option<u32>,
    #[serde(default)]
    pub sajda: Option<Sajda>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub audio_secondary: Vec<String>,
    #[serde(default)]
    pub surah: Option<SurahReference>,
    #[serde(default)]
    pub edition: Option<Edition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surah {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub revelation_type: RevelationType,
    pub number_of_ayahs: u32,
    pub ayahs: Vec<Ayah>,
    pub edition: Edition,
}

impl Surah {
    pub fn reference(&self) -> SurahReference {
        SurahReference {
            number: self.number,
            name: self.name.clone(),
            english_name: self.english_name.clone(),
            english_name_translation: self.english_name_translation.clone(),
            number_of_ayahs: self.number_of_ayahs,
            revelation_type: self.revelation_type,
        }
    }
}

/// Surah inside a whole-Quran response; the edition is only given once, at the top
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuranSurah {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub revelation_type: RevelationType,
    pub ayahs: Vec<Ayah>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quran {
    pub surahs: Vec<QuranSurah>,
    pub edition: Edition,
}

/// Juz, manzil, ruku, page or hizb quarter text; `surahs` is keyed by surah number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionText {
    pub number: u32,
    pub ayahs: Vec<Ayah>,
    pub surahs: BTreeMap<String, SurahReference>,
    pub edition: Edition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SajdaAyahs {
    pub ayahs: Vec<Ayah>,
    pub edition: Edition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub count: u32,
    pub matches: Vec<Ayah>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyahPosition {
    pub surah: u32,
    pub ayah: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SajdaReference {
    pub surah: u32,
    pub ayah: u32,
    pub recommended: bool,
    pub obligatory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSection<R> {
    pub count: u32,
    #[serde(default = "Vec::new")]
    pub references: Vec<R>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub ayahs: MetaSection<AyahPosition>,
    pub surahs: MetaSection<SurahReference>,
    pub sajdas: MetaSection<SajdaReference>,
    pub rukus: MetaSection<AyahPosition>,
    pub pages: MetaSection<AyahPosition>,
    pub manzils: MetaSection<AyahPosition>,
    pub hizb_quarters: MetaSection<AyahPosition>,
    pub juzs: MetaSection<AyahPosition>,
}
