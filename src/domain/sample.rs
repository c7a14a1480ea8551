// 同梱サンプル - スキンケア成分の組み合わせ禁止表

use super::relation::ConflictRelation;

pub const BUFFET: &str = "Buffet + Copper Peptides";
pub const AHA: &str = "Alpha Hydroxy Acids";
pub const BHA: &str = "Beta Hydroxy Acids";
pub const HIPPIE: &str = "Mad Hippie";
pub const ELAA: &str = "Ethylated Ascorbic Acid";
pub const RETINOL: &str = "Retinol";

/// スキンケア成分の衝突関係
pub fn skincare_relation() -> ConflictRelation<String> {
    fn own(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }
    ConflictRelation::new()
        .with(BUFFET.into(), own(&[AHA, BHA, HIPPIE, ELAA, RETINOL]))
        .with(AHA.into(), own(&[RETINOL]))
        .with(BHA.into(), own(&[RETINOL]))
        .with(HIPPIE.into(), own(&[AHA, BHA, RETINOL]))
        .with(ELAA.into(), own(&[AHA, BHA, RETINOL]))
}

/// サンプルの既知成分一覧
pub fn skincare_items() -> Vec<String> {
    [BUFFET, AHA, BHA, HIPPIE, ELAA, RETINOL]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{linearize, validate_known_items};

    #[test]
    fn sample_universe_matches_item_list() {
        let rel = skincare_relation();
        assert_eq!(linearize(&rel), skincare_items());
        assert!(validate_known_items(&rel, &skincare_items()).is_ok());
    }
}
