//! Flattens chess.com tournament rounds into one delimited row per game.

pub mod chess;
