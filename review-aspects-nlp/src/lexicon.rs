use {
    std::{fs::read_to_string, path::Path},
    anyhow::{anyhow, Context, Result},
    tracing::info,
    review_aspects_core::sentiment::Lexicon,
};

/// Reads an AFINN style `word<TAB>valence` file.
pub fn load_lexicon(path: &Path) -> Result<Lexicon> {
    let source = read_to_string(path).with_context(|| format!("failed to read lexicon {}", path.display()))?;
    let lexicon = parse_lexicon(&source)?;
    info!("loaded {} lexicon entries from {}", lexicon.len(), path.display());
    Ok(lexicon)
}

pub fn parse_lexicon(source: &str) -> Result<Lexicon> {
    let mut valences = Vec::new();

    for (line_number, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (word, valence) = line.rsplit_once('\t')
            .ok_or_else(|| anyhow!("lexicon line {} has no tab separator", line_number + 1))?;
        let valence: f64 = valence.trim().parse()
            .with_context(|| format!("lexicon line {} has an invalid valence", line_number + 1))?;

        valences.push((word.trim().to_owned(), valence));
    }

    Ok(Lexicon::new(valences))
}
