// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team join code generation.

use ring::rand::{SecureRandom, SystemRandom};

pub const TEAM_CODE_LEN: usize = 6;
const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
// Largest multiple of 36 that fits in a byte; higher bytes are rejected to
// keep the distribution uniform.
const REJECT_AT: u8 = 252;

/// Generate a random six-character uppercase alphanumeric code.
pub fn generate_team_code(rng: &SystemRandom) -> anyhow::Result<String> {
    let mut code = String::with_capacity(TEAM_CODE_LEN);
    let mut buf = [0u8; 16];

    while code.len() < TEAM_CODE_LEN {
        rng.fill(&mut buf)
            .map_err(|_| anyhow::anyhow!("System random source failed"))?;
        for &byte in buf.iter().filter(|b| **b < REJECT_AT) {
            if code.len() == TEAM_CODE_LEN {
                break;
            }
            code.push(ALPHABET[usize::from(byte % 36)] as char);
        }
    }

    Ok(code)
}

/// Canonical form of a user-entered code.
pub fn normalize_team_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
