//! Compile-time tables for the bitonic networks
//!
//! This module provides structural types for the bitonic topology (stages,
//! passes and lanes) and the `const fn` generators that turn that topology into
//! the lane patterns, lane masks and register comparator lists the networks
//! consume. Callers evaluate the generators inside inline `const` blocks, so
//! every table is folded at compile time and nothing is computed per call.
//!
//! Tables exist for lane counts 2, 4, 8 and 16.

/// Largest lane count of any register in this crate
pub const MAX_LANES: usize = 16;

/// Compare-exchange stages of the full sorting network for `MAX_LANES` lanes
pub const MAX_SORT_STAGES: usize = 10;

/// Half-cleaner stages for `MAX_LANES` lanes
pub const MAX_MERGE_STAGES: usize = 4;

/// Register comparators of the column network for `MAX_LANES` registers
pub const MAX_COMPARATORS: usize = MAX_SORT_STAGES * MAX_LANES / 2;

/// A power of two value, guaranteed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerOfTwo {
    value: u32,
    log2_value: u32,
}

impl PowerOfTwo {
    /// Create a new PowerOfTwo from a value
    /// Returns None if the value is not a power of two
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 || (value & (value - 1)) != 0 {
            None
        } else {
            Some(PowerOfTwo {
                value,
                log2_value: value.trailing_zeros(),
            })
        }
    }

    /// Create from a log2 value (e.g., 3 creates 8)
    pub const fn from_log2(log2_value: u32) -> Self {
        PowerOfTwo {
            value: 1 << log2_value,
            log2_value,
        }
    }

    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn log2(&self) -> u32 {
        self.log2_value
    }
}

/// A stage of the bitonic sorting network (0-indexed)
///
/// Stage `s` merges bitonic blocks of `2^(s+1)` elements and consists of
/// `s + 1` passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitonicStage {
    stage_number: u32,
}

impl BitonicStage {
    pub const fn new(stage_number: u32) -> Self {
        BitonicStage { stage_number }
    }

    pub const fn number(&self) -> u32 {
        self.stage_number
    }

    /// Size of the blocks that share one sort direction in this stage
    pub const fn block_size(&self) -> PowerOfTwo {
        PowerOfTwo::from_log2(self.stage_number + 1)
    }

    pub const fn num_passes(&self) -> u32 {
        self.stage_number + 1
    }
}

/// A pass within a stage; each pass halves the compare distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitonicPass {
    stage: BitonicStage,
    pass_distance: PowerOfTwo,
}

impl BitonicPass {
    /// Create a new pass within a stage
    pub const fn new(stage: BitonicStage, pass_index: u32) -> Option<Self> {
        if pass_index > stage.number() {
            None
        } else {
            Some(BitonicPass {
                stage,
                pass_distance: PowerOfTwo::from_log2(stage.number() - pass_index),
            })
        }
    }

    pub const fn stage(&self) -> BitonicStage {
        self.stage
    }

    /// Compare distance of this pass
    pub const fn distance(&self) -> PowerOfTwo {
        self.pass_distance
    }
}

/// One position of the network: a lane inside a register, or a register
/// inside a block when the network runs across registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lane {
    index: u32,
}

impl Lane {
    pub const fn new(index: u32) -> Self {
        Lane { index }
    }

    /// The position this lane is compared against in `pass`
    pub const fn partner(&self, pass: &BitonicPass) -> u32 {
        self.index ^ pass.distance().value()
    }

    /// Whether the block holding this lane sorts ascending in `pass`
    pub const fn is_ascending(&self, pass: &BitonicPass) -> bool {
        (self.index & pass.stage().block_size().value()) == 0
    }

    /// Whether this lane is the higher-indexed end of its pair
    pub const fn is_upper(&self, pass: &BitonicPass) -> bool {
        (self.index & pass.distance().value()) != 0
    }

    /// Whether this lane receives the larger value of its pair
    pub const fn takes_max(&self, pass: &BitonicPass) -> bool {
        self.is_upper(pass) == self.is_ascending(pass)
    }
}

/// Lane permutation: lane `i` of the result reads lane `source(i)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanePattern {
    lanes: [u8; MAX_LANES],
}

impl LanePattern {
    pub const IDENTITY: LanePattern = LanePattern::xor(0);

    /// Build a pattern from explicit source lanes; lanes past the end of
    /// `sources` map to themselves
    pub const fn from_slice(sources: &[u8]) -> Self {
        assert!(sources.len() <= MAX_LANES, "too many lanes in pattern");
        let mut pattern = Self::IDENTITY;
        let mut i = 0;
        while i < sources.len() {
            assert!((sources[i] as usize) < MAX_LANES, "source lane out of range");
            pattern.lanes[i] = sources[i];
            i += 1;
        }
        pattern
    }

    /// Pair every lane with the lane `distance` away inside its `2 * distance` block
    pub const fn xor(distance: usize) -> Self {
        let mut lanes = [0u8; MAX_LANES];
        let mut i = 0;
        while i < MAX_LANES {
            lanes[i] = (i ^ distance) as u8;
            i += 1;
        }
        LanePattern { lanes }
    }

    /// Reverse the first `width` lanes
    pub const fn reversed(width: usize) -> Self {
        assert!(width <= MAX_LANES, "too many lanes in pattern");
        let mut pattern = Self::IDENTITY;
        let mut i = 0;
        while i < width {
            pattern.lanes[i] = (width - 1 - i) as u8;
            i += 1;
        }
        pattern
    }

    pub const fn inverse(&self) -> Self {
        let mut inverse = Self::IDENTITY;
        let mut i = 0;
        while i < MAX_LANES {
            inverse.lanes[self.lanes[i] as usize] = i as u8;
            i += 1;
        }
        inverse
    }

    #[inline(always)]
    pub const fn source(&self, lane: usize) -> usize {
        self.lanes[lane] as usize
    }

    #[inline(always)]
    pub const fn as_array(&self) -> &[u8; MAX_LANES] {
        &self.lanes
    }
}

/// One bit per lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneMask(u16);

impl LaneMask {
    pub const NONE: LaneMask = LaneMask(0);

    pub const fn new(bits: u16) -> Self {
        LaneMask(bits)
    }

    /// Every lane of a `width`-lane register
    pub const fn all(width: usize) -> Self {
        assert!(width <= MAX_LANES, "too many lanes in mask");
        if width == MAX_LANES {
            LaneMask(u16::MAX)
        } else {
            LaneMask((1u16 << width) - 1)
        }
    }

    /// Lanes whose index has the `distance` bit set
    pub const fn upper_of_pairs(distance: usize) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < MAX_LANES {
            if i & distance != 0 {
                bits |= 1 << i;
            }
            i += 1;
        }
        LaneMask(bits)
    }

    #[inline(always)]
    pub const fn bits(&self) -> u16 {
        self.0
    }

    #[inline(always)]
    pub const fn contains(&self, lane: usize) -> bool {
        (self.0 >> lane) & 1 == 1
    }
}

/// A lane pairing plus the lanes it applies to
///
/// For an intra-register compare-exchange the mask names the lanes that
/// receive the maximum of their pair. For a masked two-register min/max it
/// names the lanes of the first register that take part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneStage {
    pub pattern: LanePattern,
    pub inverse: LanePattern,
    pub mask: LaneMask,
}

impl LaneStage {
    pub const IDENTITY: LaneStage = LaneStage::new(LanePattern::IDENTITY, LaneMask::NONE);

    pub const fn new(pattern: LanePattern, mask: LaneMask) -> Self {
        LaneStage {
            pattern,
            inverse: pattern.inverse(),
            mask,
        }
    }

    /// Ascending compare at `distance`: the upper lane of each pair takes the max
    pub const fn half_cleaner(distance: usize) -> Self {
        LaneStage::new(
            LanePattern::xor(distance),
            LaneMask::upper_of_pairs(distance),
        )
    }

    /// Pair lane `i` of one register with lane `width - 1 - i` of another
    pub const fn flip(width: usize) -> Self {
        LaneStage::new(LanePattern::reversed(width), LaneMask::all(width))
    }
}

/// Ordered list of lane stages
#[derive(Debug, Clone, Copy)]
pub struct StageTable {
    stages: [LaneStage; MAX_SORT_STAGES],
    distances: [u8; MAX_SORT_STAGES],
    len: usize,
}

impl StageTable {
    const EMPTY: StageTable = StageTable {
        stages: [LaneStage::IDENTITY; MAX_SORT_STAGES],
        distances: [0; MAX_SORT_STAGES],
        len: 0,
    };

    #[inline(always)]
    pub fn stages(&self) -> &[LaneStage] {
        &self.stages[..self.len]
    }

    /// Stages paired with the compare distance each one uses
    pub fn with_distances(&self) -> impl Iterator<Item = (usize, &LaneStage)> {
        self.distances[..self.len]
            .iter()
            .map(|&d| d as usize)
            .zip(self.stages())
    }
}

/// Ordered list of register compare-exchanges `[min_register, max_register]`
#[derive(Debug, Clone, Copy)]
pub struct ComparatorTable {
    pairs: [[u8; 2]; MAX_COMPARATORS],
    len: usize,
}

impl ComparatorTable {
    #[inline(always)]
    pub fn pairs(&self) -> &[[u8; 2]] {
        &self.pairs[..self.len]
    }
}

const fn network_width(width: usize) -> PowerOfTwo {
    assert!(
        width >= 2 && width <= MAX_LANES,
        "network width must be between 2 and 16"
    );
    match PowerOfTwo::new(width as u32) {
        Some(p) => p,
        None => panic!("network width must be a power of two"),
    }
}

const fn pass_at(stage: BitonicStage, pass_index: u32) -> BitonicPass {
    match BitonicPass::new(stage, pass_index) {
        Some(pass) => pass,
        None => panic!("pass index past the end of its stage"),
    }
}

/// Number of compare-exchange stages in the sorting network for `width` lanes
pub const fn sort_stage_count(width: usize) -> usize {
    let log2 = network_width(width).log2() as usize;
    log2 * (log2 + 1) / 2
}

/// Intra-register bitonic sorting network for `width` lanes
pub const fn sort_stages(width: usize) -> StageTable {
    let log2 = network_width(width).log2();
    let mut table = StageTable::EMPTY;
    let mut s = 0;
    while s < log2 {
        let stage = BitonicStage::new(s);
        let mut p = 0;
        while p < stage.num_passes() {
            let pass = pass_at(stage, p);
            let mut bits = 0u16;
            let mut lane = 0;
            while lane < width {
                if Lane::new(lane as u32).takes_max(&pass) {
                    bits |= 1 << lane;
                }
                lane += 1;
            }
            let distance = pass.distance().value() as usize;
            table.stages[table.len] = LaneStage::new(LanePattern::xor(distance), LaneMask::new(bits));
            table.distances[table.len] = distance as u8;
            table.len += 1;
            p += 1;
        }
        s += 1;
    }
    assert!(table.len == sort_stage_count(width));
    table
}

/// Half-cleaners at distances `width / 2, …, 1`; sorts any bitonic register
pub const fn merge_stages(width: usize) -> StageTable {
    let mut table = StageTable::EMPTY;
    let mut distance = network_width(width).value() as usize / 2;
    while distance > 0 {
        table.stages[table.len] = LaneStage::half_cleaner(distance);
        table.distances[table.len] = distance as u8;
        table.len += 1;
        distance /= 2;
    }
    table
}

/// The sorting network of `sort_stages` laid across `registers` registers
pub const fn column_comparators(registers: usize) -> ComparatorTable {
    let log2 = network_width(registers).log2();
    let mut table = ComparatorTable {
        pairs: [[0; 2]; MAX_COMPARATORS],
        len: 0,
    };
    let mut s = 0;
    while s < log2 {
        let stage = BitonicStage::new(s);
        let mut p = 0;
        while p < stage.num_passes() {
            let pass = pass_at(stage, p);
            let mut i = 0;
            while i < registers {
                let lane = Lane::new(i as u32);
                let partner = lane.partner(&pass) as usize;
                if partner > i {
                    table.pairs[table.len] = if lane.is_ascending(&pass) {
                        [i as u8, partner as u8]
                    } else {
                        [partner as u8, i as u8]
                    };
                    table.len += 1;
                }
                i += 1;
            }
            p += 1;
        }
        s += 1;
    }
    assert!(table.len == sort_stage_count(registers) * registers / 2);
    table
}
