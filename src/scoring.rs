//! Pure venue-score computation and display shaping.
//!
//! The "profitability" produced here is a synthetic ranking signal, not a
//! market price: a fixed baseline minus venue constants plus a small random
//! perturbation. Keeping it behind `venue_score` lets a real price feed
//! replace the random term later without touching scheduling or store logic.

use rand::Rng;

/// All scores are expressed relative to this baseline; the reported
/// profitability is `score - PROFIT_BASELINE`.
pub const PROFIT_BASELINE: f64 = 100.0;

/// The house venue trades at a lower fee than everyone else.
pub const PRIMARY_VENUE: &str = "PancakeSwap";
pub const PRIMARY_FEE_RATE: f64 = 0.25;
pub const DEFAULT_FEE_RATE: f64 = 0.30;

pub const BSC_CHAIN_ID: u64 = 56;

/// Reference unit price of the quoted token, perturbed per refresh.
pub const BASE_PRICE_USD: f64 = 0.0245;

// Gas cost in score units (percentage points) and its display string.
// BSC is cheap; everything else models L1 gas.
const GAS_UNITS_BSC: f64 = 0.10;
const GAS_UNITS_DEFAULT: f64 = 1.20;
const GAS_DISPLAY_BSC: &str = "$0.15";
const GAS_DISPLAY_DEFAULT: &str = "$4.20";

/// Notional trade size used to shape the displayed price impact.
const IMPACT_NOTIONAL_USD: f64 = 5_000.0;

pub fn fee_rate(venue_name: &str) -> f64 {
    if venue_name == PRIMARY_VENUE {
        PRIMARY_FEE_RATE
    } else {
        DEFAULT_FEE_RATE
    }
}

pub fn gas_cost_units(chain_id: u64) -> f64 {
    if chain_id == BSC_CHAIN_ID {
        GAS_UNITS_BSC
    } else {
        GAS_UNITS_DEFAULT
    }
}

pub fn gas_fee_display(chain_id: u64) -> &'static str {
    if chain_id == BSC_CHAIN_ID {
        GAS_DISPLAY_BSC
    } else {
        GAS_DISPLAY_DEFAULT
    }
}

/// The core scoring function: baseline minus gas and fee, plus market noise.
pub fn venue_score(fee_rate: f64, chain_id: u64, market_variation: f64) -> f64 {
    PROFIT_BASELINE - gas_cost_units(chain_id) - fee_rate + market_variation
}

/// Uniform perturbation in `[-band, +band]` percentage points. A band of zero
/// (or below) disables the noise entirely.
pub fn market_variation(band: f64) -> f64 {
    if band <= 0.0 {
        return 0.0;
    }
    rand::thread_rng().gen_range(-band..=band)
}

/// Renders the score relative to the baseline with an explicit leading `+`
/// when non-negative, e.g. `"+0.12%"` or `"-0.85%"`.
pub fn format_profitability(score: f64) -> String {
    let delta = score - PROFIT_BASELINE;
    if delta >= 0.0 {
        format!("+{:.2}%", delta)
    } else {
        format!("{:.2}%", delta)
    }
}

/// Ranking key: numeric value of a formatted profitability string.
pub fn parse_profitability(value: &str) -> f64 {
    value.trim_end_matches('%').parse::<f64>().unwrap_or(0.0)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Human readable magnitude, e.g. `"$5.8M"` or `"$910.3K"`.
pub fn format_magnitude(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("${:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.2}", value)
    }
}

/// Baseline pool depth per venue in USD. Display shaping only.
pub fn liquidity_baseline(venue_name: &str) -> f64 {
    match venue_name {
        "PancakeSwap" => 5_800_000.0,
        "Biswap" => 2_100_000.0,
        "ApeSwap" => 1_400_000.0,
        "BakerySwap" => 860_000.0,
        "Uniswap" => 3_200_000.0,
        _ => 1_000_000.0,
    }
}

/// Baseline 24h volume per venue in USD. Display shaping only.
pub fn volume_baseline(venue_name: &str) -> f64 {
    match venue_name {
        "PancakeSwap" => 2_400_000.0,
        "Biswap" => 910_000.0,
        "ApeSwap" => 540_000.0,
        "BakerySwap" => 310_000.0,
        "Uniswap" => 1_700_000.0,
        _ => 400_000.0,
    }
}

/// Impact of the reference notional against pool depth, floored so shallow
/// pools never render as zero impact.
pub fn price_impact(liquidity_usd: f64) -> f64 {
    (IMPACT_NOTIONAL_USD / liquidity_usd * 100.0).max(0.01)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_rate_by_venue() {
        assert_eq!(fee_rate("PancakeSwap"), 0.25);
        assert_eq!(fee_rate("Biswap"), 0.30);
        assert_eq!(fee_rate("SomethingNew"), 0.30);
    }

    #[test]
    fn test_gas_units_by_chain() {
        assert!(gas_cost_units(56) < gas_cost_units(1));
        assert_eq!(gas_fee_display(56), "$0.15");
        assert_eq!(gas_fee_display(1), "$4.20");
    }

    #[test]
    fn test_score_ranking_without_noise() {
        // Lower fee wins on the same chain; BSC gas beats L1 gas at equal fee.
        let a = venue_score(0.25, 56, 0.0);
        let b = venue_score(0.30, 56, 0.0);
        let c = venue_score(0.30, 1, 0.0);
        assert!(a > b);
        assert!(b > c);
    }

    #[test]
    fn test_format_profitability_signs() {
        assert_eq!(format_profitability(100.12), "+0.12%");
        assert_eq!(format_profitability(100.0), "+0.00%");
        assert_eq!(format_profitability(99.15), "-0.85%");
    }

    #[test]
    fn test_parse_profitability_round_trip() {
        assert_eq!(parse_profitability("+0.12%"), 0.12);
        assert_eq!(parse_profitability("-0.85%"), -0.85);
        assert_eq!(parse_profitability("garbage"), 0.0);
    }

    #[test]
    fn test_variation_band() {
        assert_eq!(market_variation(0.0), 0.0);
        assert_eq!(market_variation(-1.0), 0.0);
        for _ in 0..100 {
            let v = market_variation(0.5);
            assert!((-0.5..=0.5).contains(&v));
        }
    }

    #[test]
    fn test_format_magnitude() {
        assert_eq!(format_magnitude(5_800_000.0), "$5.8M");
        assert_eq!(format_magnitude(910_300.0), "$910.3K");
        assert_eq!(format_magnitude(42.0), "$42.00");
        assert_eq!(format_magnitude(1_200_000_000.0), "$1.2B");
    }

    #[test]
    fn test_price_impact_floor() {
        assert!(price_impact(5_800_000.0) > 0.01);
        assert_eq!(price_impact(f64::MAX), 0.01);
    }
}
