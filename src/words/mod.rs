use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static BANK_DIR: Dir = include_dir!("src/words");

/// Drill text used when the word bank cannot be read.
pub const FALLBACK_PHRASE: &str = "the quick brown fox jumps over the lazy dog";

#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct WordBank {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordBank {
    pub fn load(file_name: &str) -> Result<Self, Box<dyn Error>> {
        let file = BANK_DIR
            .get_file(format!("{file_name}.json"))
            .ok_or_else(|| format!("word bank '{file_name}' not found"))?;

        let contents = file
            .contents_utf8()
            .ok_or("word bank is not valid utf-8")?;

        let bank = from_str(contents)?;

        Ok(bank)
    }

    /// Picks distinct words at random; `count` is clamped to at least one
    /// word and at most the whole bank.
    pub fn sample(&self, count: usize) -> Vec<String> {
        if self.words.is_empty() {
            return vec![];
        }
        let count = count.clamp(1, self.words.len());
        let mut rng = rand::thread_rng();

        self.words
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect()
    }

    pub fn phrase(&self, count: usize) -> String {
        self.sample(count).iter().join(" ")
    }
}

/// Samples a drill text of `count` words from the default bank.
pub fn generate(count: usize) -> Result<String, Box<dyn Error>> {
    let bank = WordBank::load("english")?;
    let phrase = bank.phrase(count);
    if phrase.is_empty() {
        return Err("word bank is empty".into());
    }
    Ok(phrase)
}
