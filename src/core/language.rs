//! Mapping from source files to BOJ language codes.
//!
//! BOJ does not detect the language of a submission; the submit form carries
//! a numeric language code instead. The code is picked from the file
//! extension and, for languages with several toolchains, from the compiler
//! and version preferences in the `[languages]` config section.

use crate::config::toml_config::{LanguagePreference, LanguagesConfig};
use crate::utils::error::{BojError, Result};
use std::path::Path;

/// g++ C++14
pub const FALLBACK_CODE: u32 = 88;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Cpp,
    C,
    Python,
    Java,
    Text,
    JavaScript,
    Aheui,
}

impl Language {
    /// 副檔名需完全相符；`.C` 常用於 C++，不能當成 C
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "cc" | "cpp" | "c++" => Some(Language::Cpp),
            "c" => Some(Language::C),
            "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "txt" => Some(Language::Text),
            "js" => Some(Language::JavaScript),
            "aheui" => Some(Language::Aheui),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::C => "C",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Text => "Text",
            Language::JavaScript => "JavaScript",
            Language::Aheui => "Aheui",
        }
    }

    /// 依設定決定語言代碼；未設定該語言區段時使用預設值
    pub fn code(self, languages: &LanguagesConfig) -> Result<u32> {
        match self {
            Language::Cpp => match &languages.cpp {
                None => Ok(88),
                Some(pref) => cpp_code(pref),
            },
            Language::C => match &languages.c {
                None => Ok(75),
                Some(pref) => c_code(pref),
            },
            Language::Python => match &languages.python {
                None => Ok(28),
                Some(pref) => python_code(pref),
            },
            Language::Java => match &languages.java {
                None => Ok(3),
                Some(pref) => java_code(pref),
            },
            Language::Text => Ok(58),
            Language::JavaScript => Ok(17),
            Language::Aheui => Ok(83),
        }
    }
}

/// 由檔名解析語言代碼，未知副檔名退回 C++14
pub fn language_code_for(path: &Path, languages: &LanguagesConfig) -> Result<u32> {
    match Language::from_path(path) {
        Some(language) => {
            let code = language.code(languages)?;
            tracing::debug!("Detected {} (code {}) for {}", language.name(), code, path.display());
            Ok(code)
        }
        None => {
            tracing::warn!(
                "Unknown extension for {}, falling back to language code {}",
                path.display(),
                FALLBACK_CODE
            );
            Ok(FALLBACK_CODE)
        }
    }
}

fn unsupported(language: Language, reason: String) -> BojError {
    BojError::UnsupportedLanguage {
        language: language.name().to_string(),
        reason,
    }
}

fn cpp_code(pref: &LanguagePreference) -> Result<u32> {
    let compiler = pref.compiler_or("g++");
    let version = pref.version_or("C++14");

    let table: [(&str, u32); 3] = match compiler.to_lowercase().as_str() {
        "g++" => [("11", 49), ("14", 88), ("17", 84)],
        "clang" => [("11", 66), ("14", 67), ("17", 85)],
        _ => {
            return Err(unsupported(
                Language::Cpp,
                format!("invalid compiler '{}'", compiler),
            ))
        }
    };

    table
        .iter()
        .find(|(needle, _)| version.contains(needle))
        .map(|(_, code)| *code)
        .ok_or_else(|| unsupported(Language::Cpp, format!("invalid version '{}'", version)))
}

fn c_code(pref: &LanguagePreference) -> Result<u32> {
    let compiler = pref.compiler_or("gcc");
    let version = pref.version_or("C11");

    let (c11, plain) = match compiler.to_lowercase().as_str() {
        "gcc" => (75, 0),
        "clang" => (77, 59),
        _ => {
            return Err(unsupported(
                Language::C,
                format!("invalid compiler '{}'", compiler),
            ))
        }
    };

    if version.contains("11") {
        Ok(c11)
    } else if version == "C" {
        Ok(plain)
    } else {
        Err(unsupported(Language::C, format!("invalid version '{}'", version)))
    }
}

fn python_code(pref: &LanguagePreference) -> Result<u32> {
    let compiler = pref.compiler_or("CPython");
    let version = pref.version_or("3");

    let (py2, py3) = match compiler.to_lowercase().as_str() {
        "cpython" => (6, 28),
        "pypy" => (32, 73),
        _ => {
            return Err(unsupported(
                Language::Python,
                format!("invalid interpreter '{}'", compiler),
            ))
        }
    };

    // 只看主版本號，"3.12" 不能被當成 Python 2
    match version.chars().find(|c| c.is_ascii_digit()) {
        Some('2') => Ok(py2),
        Some('3') => Ok(py3),
        _ => Err(unsupported(
            Language::Python,
            format!("invalid version '{}'", version),
        )),
    }
}

fn java_code(pref: &LanguagePreference) -> Result<u32> {
    let compiler = pref.compiler_or("Oracle");
    match compiler.to_lowercase().as_str() {
        "oracle" => Ok(3),
        "openjdk" => Ok(91),
        _ => Err(unsupported(
            Language::Java,
            format!("invalid compiler '{}'", compiler),
        )),
    }
}
