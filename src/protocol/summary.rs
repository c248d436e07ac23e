//! JSON summary of a scored galaxy.

use std::io::Write;

use serde::Serialize;

use super::board_string::encode_board_string;
use crate::board::Galaxy;
use crate::claims::{compute_distance_claims, slices};
use crate::error::GalaxyError;
use crate::score::{evaluate, ScoreConfig};

/// One placed tile.
#[derive(Debug, Clone, Serialize)]
pub struct TileSummary {
    pub x: usize,
    pub y: usize,
    pub id: i32,
    /// Owning player for home systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<u8>,
    pub description: String,
}

/// One player's share of the board.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub player: u8,
    pub home: (usize, usize),
    /// Share-weighted value of every claimed system.
    pub value: f64,
    /// Planet-bearing systems where this player alone is closest.
    pub claimed_systems: usize,
    /// Planet-bearing systems where this player ties for closest.
    pub contested_systems: usize,
}

/// Everything the CLI reports about the best galaxy.
#[derive(Debug, Clone, Serialize)]
pub struct GalaxySummary {
    pub score: f64,
    pub radius: usize,
    pub board: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
    pub players: Vec<PlayerSummary>,
    pub tiles: Vec<TileSummary>,
}

impl GalaxySummary {
    /// Re-scores `galaxy` under `config` and collects the summary.
    pub fn build(galaxy: &Galaxy, config: &ScoreConfig) -> Result<Self, GalaxyError> {
        let breakdown = evaluate(galaxy, config)?;
        let distances = compute_distance_claims(galaxy, &config.weights);
        let slices = slices(galaxy, &distances);

        let players = galaxy
            .home_systems()
            .zip(slices.iter())
            .map(|((player, home), slice)| {
                let planet_bearing = |tiles: &[usize]| {
                    tiles
                        .iter()
                        .filter(|&&i| galaxy.tile_at(i).has_planets())
                        .count()
                };
                PlayerSummary {
                    player,
                    home: galaxy.coords(home),
                    value: breakdown
                        .totals
                        .get(player as usize - 1)
                        .copied()
                        .unwrap_or(0.0),
                    claimed_systems: planet_bearing(&slice.claimed),
                    contested_systems: planet_bearing(&slice.contested),
                }
            })
            .collect();

        let tiles = galaxy
            .playable()
            .map(|idx| {
                let (x, y) = galaxy.coords(idx);
                let tile = galaxy.tile_at(idx);
                TileSummary {
                    x,
                    y,
                    id: tile.id,
                    home: tile.home_player(),
                    description: tile.to_string(),
                }
            })
            .collect();

        Ok(GalaxySummary {
            score: breakdown.score,
            radius: galaxy.radius(),
            board: encode_board_string(galaxy),
            rejection: breakdown.rejection.map(|r| r.to_string()),
            players,
            tiles,
        })
    }

    /// Writes the summary as pretty-printed JSON followed by a newline.
    pub fn write_json<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::home_system_layout;
    use crate::random::RandomSequence;

    fn open_config() -> ScoreConfig {
        ScoreConfig {
            both_holes_required: false,
            hard_hole_limit: false,
            hole_count: 0,
            ..ScoreConfig::default()
        }
    }

    #[test]
    fn ring_of_homes_summary() {
        let homes = home_system_layout(1, 6).unwrap();
        let g = Galaxy::assemble(1, &homes, Vec::new()).unwrap();
        let s = GalaxySummary::build(&g, &open_config()).unwrap();
        assert!((s.score - 1.0).abs() < 1e-9);
        assert_eq!(s.board, "0 0 0 0 0 0");
        assert_eq!(s.players.len(), 6);
        for p in &s.players {
            assert_eq!(p.claimed_systems, 0);
            assert_eq!(p.contested_systems, 1);
        }
        assert_eq!(s.tiles.len(), 7);
        assert!(s.rejection.is_none());
    }

    #[test]
    fn rejected_galaxy_reports_reason() {
        let homes = home_system_layout(1, 6).unwrap();
        let g = Galaxy::assemble(1, &homes, Vec::new()).unwrap();
        let s = GalaxySummary::build(&g, &ScoreConfig::default()).unwrap();
        assert_eq!(s.score, 0.0);
        assert!(s.rejection.unwrap().contains("wormhole"));
        assert!(s.players.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn json_has_expected_fields() {
        let g = Galaxy::generate(3, 6, &RandomSequence::from_seed(2)).unwrap();
        let s = GalaxySummary::build(&g, &open_config()).unwrap();
        let mut buf = Vec::new();
        s.write_json(&mut buf).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["radius"], 3);
        assert_eq!(v["players"].as_array().unwrap().len(), 6);
        assert_eq!(v["tiles"].as_array().unwrap().len(), 37);
        assert_eq!(v["board"].as_str().unwrap().split(' ').count(), 36);
        assert_eq!(v["score"].as_f64().unwrap(), s.score);
    }
}
