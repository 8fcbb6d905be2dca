//! Single-block compression: four 16-step rounds over a 128-bit running state.

use super::{BLOCK_LEN, BLOCK_WORDS, DIGEST_LEN, STATE_WORDS};

const STEPS: usize = 64;
const STEPS_PER_ROUND: usize = 16;

/// Additive step constants, `floor(|sin(i + 1)| * 2^32)`.
const ROUND_CONSTANTS: [u32; STEPS] = [
    0xD76A_A478,
    0xE8C7_B756,
    0x2420_70DB,
    0xC1BD_CEEE,
    0xF57C_0FAF,
    0x4787_C62A,
    0xA830_4613,
    0xFD46_9501,
    0x6980_98D8,
    0x8B44_F7AF,
    0xFFFF_5BB1,
    0x895C_D7BE,
    0x6B90_1122,
    0xFD98_7193,
    0xA679_438E,
    0x49B4_0821,
    0xF61E_2562,
    0xC040_B340,
    0x265E_5A51,
    0xE9B6_C7AA,
    0xD62F_105D,
    0x0244_1453,
    0xD8A1_E681,
    0xE7D3_FBC8,
    0x21E1_CDE6,
    0xC337_07D6,
    0xF4D5_0D87,
    0x455A_14ED,
    0xA9E3_E905,
    0xFCEF_A3F8,
    0x676F_02D9,
    0x8D2A_4C8A,
    0xFFFA_3942,
    0x8771_F681,
    0x6D9D_6122,
    0xFDE5_380C,
    0xA4BE_EA44,
    0x4BDE_CFA9,
    0xF6BB_4B60,
    0xBEBF_BC70,
    0x289B_7EC6,
    0xEAA1_27FA,
    0xD4EF_3085,
    0x0488_1D05,
    0xD9D4_D039,
    0xE6DB_99E5,
    0x1FA2_7CF8,
    0xC4AC_5665,
    0xF429_2244,
    0x432A_FF97,
    0xAB94_23A7,
    0xFC93_A039,
    0x655B_59C3,
    0x8F0C_CC92,
    0xFFEF_F47D,
    0x8584_5DD1,
    0x6FA8_7E4F,
    0xFE2C_E6E0,
    0xA301_4314,
    0x4E08_11A1,
    0xF753_7E82,
    0xBD3A_F235,
    0x2AD7_D2BB,
    0xEB86_D391,
];

/// Which block word each step consumes.
const WORD_INDEX: [usize; STEPS] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, // round 1
    1, 6, 11, 0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, // round 2
    5, 8, 11, 14, 1, 4, 7, 10, 13, 0, 3, 6, 9, 12, 15, 2, // round 3
    0, 7, 14, 5, 12, 3, 10, 1, 8, 15, 6, 13, 4, 11, 2, 9, // round 4
];

/// Left-rotation amounts, repeating every four steps within a round.
const SHIFTS: [[u32; STATE_WORDS]; 4] = [
    [7, 12, 17, 22],
    [5, 9, 14, 20],
    [4, 11, 16, 23],
    [6, 10, 15, 21],
];

/// Running state of one digest computation: the four words A, B, C, D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State([u32; STATE_WORDS]);

impl State {
    /// Standard initialisation constants.
    pub const INITIAL: Self = Self([0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476]);

    /// Construct from raw words in A, B, C, D order.
    #[must_use]
    pub const fn from_words(words: [u32; STATE_WORDS]) -> Self {
        Self(words)
    }

    /// Words in A, B, C, D order.
    #[must_use]
    pub const fn words(&self) -> [u32; STATE_WORDS] {
        self.0
    }

    /// Word A
    #[must_use]
    pub const fn a(&self) -> u32 {
        self.0[0]
    }

    /// Word B
    #[must_use]
    pub const fn b(&self) -> u32 {
        self.0[1]
    }

    /// Word C
    #[must_use]
    pub const fn c(&self) -> u32 {
        self.0[2]
    }

    /// Word D
    #[must_use]
    pub const fn d(&self) -> u32 {
        self.0[3]
    }

    /// Serialise as digest bytes, each word least-significant byte first.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; DIGEST_LEN] {
        let mut out = [0u8; DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }
}

impl Default for State {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Decode a 64-byte block into sixteen little-endian words.
#[must_use]
pub fn decode_block(block: &[u8; BLOCK_LEN]) -> [u32; BLOCK_WORDS] {
    let mut words = [0u32; BLOCK_WORDS];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

#[inline(always)]
fn select(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

#[inline(always)]
fn select_inverse(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

#[inline(always)]
fn parity(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn or_not(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

/// Fold one decoded block into `state`, returning the new state.
///
/// Step `i` overwrites register `(4 - i % 4) % 4`, so the written register
/// cycles A, D, C, B and the other three are read in rotation order after it.
#[must_use]
pub fn compress(state: State, block: &[u32; BLOCK_WORDS]) -> State {
    let mut regs = state.0;

    for step in 0..STEPS {
        let round = step / STEPS_PER_ROUND;
        let a = (STATE_WORDS - step % STATE_WORDS) % STATE_WORDS;
        let b = (a + 1) % STATE_WORDS;
        let c = (a + 2) % STATE_WORDS;
        let d = (a + 3) % STATE_WORDS;

        let mix = match round {
            0 => select(regs[b], regs[c], regs[d]),
            1 => select_inverse(regs[b], regs[c], regs[d]),
            2 => parity(regs[b], regs[c], regs[d]),
            _ => or_not(regs[b], regs[c], regs[d]),
        };

        let sum = regs[a]
            .wrapping_add(mix)
            .wrapping_add(block[WORD_INDEX[step]])
            .wrapping_add(ROUND_CONSTANTS[step]);
        regs[a] = regs[b].wrapping_add(sum.rotate_left(SHIFTS[round][step % STATE_WORDS]));
    }

    let mut out = state.0;
    for (word, reg) in out.iter_mut().zip(regs) {
        *word = word.wrapping_add(reg);
    }
    State(out)
}
