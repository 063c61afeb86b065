//! Gen9 raid reward computation: fixed table emission plus the seeded
//! lottery draw.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::constants::{REWARD_SLOTS, TERA_SHARD_IDS};
use crate::error::{CoreError, Result};
use crate::rng::Xoroshiro128Plus;

/// One granted reward. `subject_type`: 0 = host, 1 = joiner,
/// 2 = everyone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RewardItem {
    pub item_id: u16,
    pub amount: u8,
    pub subject_type: i8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedEntry {
    pub category: u8,
    pub item_id: u16,
    pub amount: u8,
    pub subject_type: i8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LotteryEntry {
    pub category: u8,
    pub item_id: u16,
    pub amount: u8,
    pub rate: u16,
}

#[derive(Clone, Debug, Default)]
pub struct LotteryTable {
    pub total_rate: u16,
    pub items: Vec<LotteryEntry>,
}

/// Both reward table files, keyed by the template's reward hashes.
#[derive(Debug, Default)]
pub struct RewardTables {
    fixed: HashMap<u64, Vec<FixedEntry>>,
    lottery: HashMap<u64, LotteryTable>,
}

impl RewardTables {
    pub fn load(fixed_path: &Path, lottery_path: &Path) -> Result<Self> {
        let mut tables = Self::default();
        tables.load_fixed(fixed_path)?;
        tables.load_lottery(lottery_path)?;
        log::info!(
            "loaded reward tables: {} fixed, {} lottery",
            tables.fixed.len(),
            tables.lottery.len()
        );
        Ok(tables)
    }

    pub fn add_fixed(&mut self, hash: u64, entries: Vec<FixedEntry>) {
        self.fixed.insert(hash, entries);
    }

    pub fn add_lottery(&mut self, hash: u64, table: LotteryTable) {
        self.lottery.insert(hash, table);
    }

    fn load_fixed(&mut self, path: &Path) -> Result<()> {
        let data = fs::read(path).map_err(|e| CoreError::ResourceMissing {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        self.parse_fixed(&data).ok_or_else(|| CoreError::ResourceMissing {
            path: path.to_path_buf(),
            detail: "truncated fixed reward table".into(),
        })
    }

    fn load_lottery(&mut self, path: &Path) -> Result<()> {
        let data = fs::read(path).map_err(|e| CoreError::ResourceMissing {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        self.parse_lottery(&data).ok_or_else(|| CoreError::ResourceMissing {
            path: path.to_path_buf(),
            detail: "truncated lottery reward table".into(),
        })
    }

    fn parse_fixed(&mut self, data: &[u8]) -> Option<()> {
        let mut cursor = Cursor { data, pos: 0 };
        let table_count = cursor.u16()?;
        for _ in 0..table_count {
            let hash = cursor.u64()?;
            let count = cursor.u8()?;
            let mut items = Vec::with_capacity(count as usize);
            for _ in 0..count {
                items.push(FixedEntry {
                    category: cursor.u8()?,
                    item_id: cursor.u16()?,
                    amount: cursor.u8()?,
                    subject_type: cursor.u8()? as i8,
                });
            }
            self.fixed.insert(hash, items);
        }
        Some(())
    }

    fn parse_lottery(&mut self, data: &[u8]) -> Option<()> {
        let mut cursor = Cursor { data, pos: 0 };
        let table_count = cursor.u16()?;
        for _ in 0..table_count {
            let hash = cursor.u64()?;
            let total_rate = cursor.u16()?;
            let count = cursor.u8()?;
            let mut items = Vec::with_capacity(count as usize);
            for _ in 0..count {
                items.push(LotteryEntry {
                    category: cursor.u8()?,
                    item_id: cursor.u16()?,
                    amount: cursor.u8()?,
                    rate: cursor.u16()?,
                });
            }
            self.lottery.insert(hash, LotteryTable { total_rate, items });
        }
        Some(())
    }

    /// Deterministic reward list for one raid: every fixed entry, then
    /// the seeded lottery draws.
    pub fn calculate(
        &self,
        seed: u32,
        stars: u8,
        fixed_hash: u64,
        lottery_hash: u64,
        species: u16,
        tera_type: u8,
    ) -> Vec<RewardItem> {
        let mut result = Vec::new();

        if let Some(entries) = self.fixed.get(&fixed_hash) {
            for entry in entries {
                let item_id = resolve_item(entry.category, entry.item_id, species, tera_type);
                if item_id > 0 {
                    result.push(RewardItem {
                        item_id,
                        amount: entry.amount,
                        subject_type: entry.subject_type,
                    });
                }
            }
        }

        if let Some(table) = self.lottery.get(&lottery_hash) {
            if !table.items.is_empty() && table.total_rate > 0 {
                let mut rng = Xoroshiro128Plus::new(seed as u64);
                let count = reward_count(rng.next_bounded(100), stars);

                for _ in 0..count {
                    let mut threshold = rng.next_bounded(table.total_rate as u64) as i32;
                    for entry in &table.items {
                        if entry.rate as i32 > threshold {
                            let item_id =
                                resolve_item(entry.category, entry.item_id, species, tera_type);
                            if item_id > 0 {
                                result.push(RewardItem {
                                    item_id,
                                    amount: entry.amount,
                                    subject_type: 2,
                                });
                            }
                            break;
                        }
                        threshold -= entry.rate as i32;
                    }
                }
            }
        }

        result
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn u8(&mut self) -> Option<u8> {
        let v = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    fn u16(&mut self) -> Option<u16> {
        let v = u16::from_le_bytes(self.data.get(self.pos..self.pos + 2)?.try_into().ok()?);
        self.pos += 2;
        Some(v)
    }

    fn u64(&mut self) -> Option<u64> {
        let v = u64::from_le_bytes(self.data.get(self.pos..self.pos + 8)?.try_into().ok()?);
        self.pos += 8;
        Some(v)
    }
}

/// Placeholder items resolve by category: 1 is the species material,
/// 2 the tera shard.
fn resolve_item(category: u8, item_id: u16, species: u16, tera_type: u8) -> u16 {
    if item_id != 0 {
        return item_id;
    }
    match category {
        2 => tera_shard_id(tera_type),
        1 => material_id(species),
        _ => 0,
    }
}

/// Lottery draw count from the count roll and the star tier.
pub fn reward_count(roll: u64, stars: u8) -> u8 {
    let row = (stars.max(1).min(7) - 1) as usize;
    let column = match roll {
        0..=9 => 0,
        10..=39 => 1,
        40..=69 => 2,
        70..=89 => 3,
        _ => 4,
    };
    REWARD_SLOTS[row][column]
}

/// Shard item id for a tera type index; out-of-range types fall back to
/// the first shard.
pub fn tera_shard_id(tera_type: u8) -> u16 {
    if (tera_type as usize) < TERA_SHARD_IDS.len() {
        TERA_SHARD_IDS[tera_type as usize]
    } else {
        TERA_SHARD_IDS[0]
    }
}

/// Species-derived crafting material item id; 0 when the species drops
/// none.
pub fn material_id(species: u16) -> u16 {
    match species {
        48 | 49 => 1956,
        50 | 51 => 1957,
        52 | 53 => 1958,
        54 | 55 => 1959,
        56 | 57 | 979 => 1960,
        58 | 59 => 1961,
        79 | 80 | 199 => 1962,
        81 | 82 | 462 => 1963,
        88 | 89 => 1964,
        90 | 91 => 1965,
        92 | 93 | 94 => 1966,
        96 | 97 => 1967,
        100 | 101 => 1968,
        123 | 212 | 900 => 1969,
        128 => 1970,
        129 | 130 => 1971,
        132 => 1972,
        133 | 134 | 135 | 136 | 196 | 197 | 470 | 471 | 700 => 1973,
        147 | 148 | 149 => 1974,
        172 | 25 | 26 => 1975,
        174 | 39 | 40 => 1976,
        179 | 180 | 181 => 1977,
        187 | 188 | 189 => 1978,
        191 | 192 => 1979,
        198 | 430 => 1980,
        200 | 429 => 1981,
        203 | 981 => 1982,
        204 | 205 => 1983,
        206 | 982 => 1984,
        211 | 904 => 1985,
        214 => 1986,
        215 | 461 | 903 => 1987,
        216 | 217 | 901 => 1988,
        225 => 1989,
        228 | 229 => 1990,
        231 | 232 => 1991,
        234 | 899 => 1992,
        246 | 247 | 248 => 1993,
        278 | 279 => 1994,
        280 | 281 | 282 | 475 => 1995,
        283 | 284 => 1996,
        285 | 286 => 1997,
        287 | 288 | 289 => 1998,
        296 | 297 => 1999,
        298 | 183 | 184 => 2000,
        302 => 2001,
        307 | 308 => 2002,
        316 | 317 => 2003,
        322 | 323 => 2004,
        324 => 2005,
        325 | 326 => 2006,
        331 | 332 => 2007,
        333 | 334 => 2008,
        335 => 2009,
        336 => 2010,
        339 | 340 => 2011,
        353 | 354 => 2012,
        357 => 2013,
        361 | 362 | 478 => 2014,
        370 => 2015,
        371 | 372 | 373 => 2016,
        396 | 397 | 398 => 2017,
        401 | 402 => 2018,
        403 | 404 | 405 => 2019,
        415 | 416 => 2020,
        417 => 2021,
        418 | 419 => 2022,
        422 | 423 => 2023,
        425 | 426 => 2024,
        434 | 435 => 2025,
        436 | 437 => 2026,
        438 | 185 => 2027,
        440 | 113 | 242 => 2028,
        442 => 2029,
        443 | 444 | 445 => 2030,
        447 | 448 => 2031,
        449 | 450 => 2032,
        453 | 454 => 2033,
        456 | 457 => 2034,
        459 | 460 => 2035,
        479 => 2036,
        548 | 549 => 2037,
        550 | 902 => 2038,
        551 | 552 | 553 => 2039,
        570 | 571 => 2040,
        574 | 575 | 576 => 2041,
        585 | 586 => 2042,
        590 | 591 => 2043,
        594 => 2044,
        602 | 603 | 604 => 2045,
        610 | 611 | 612 => 2046,
        613 | 614 => 2047,
        615 => 2048,
        624 | 625 | 983 => 2049,
        627 | 628 => 2050,
        633 | 634 | 635 => 2051,
        636 | 637 => 2052,
        661 | 662 | 663 => 2053,
        664 | 665 | 666 => 2054,
        667 | 668 => 2055,
        669 | 670 | 671 => 2056,
        672 | 673 => 2057,
        690 | 691 => 2058,
        692 | 693 => 2059,
        701 => 2060,
        702 => 2061,
        704 | 705 | 706 => 2062,
        707 => 2063,
        712 | 713 => 2064,
        714 | 715 => 2065,
        734 | 735 => 2066,
        739 | 740 => 2067,
        741 => 2068,
        744 | 745 => 2069,
        747 | 748 => 2070,
        749 | 750 => 2071,
        753 | 754 => 2072,
        757 | 758 => 2073,
        761 | 762 | 763 => 2074,
        765 => 2075,
        766 => 2076,
        769 | 770 => 2077,
        775 => 2078,
        778 => 2079,
        779 => 2080,
        833 | 834 => 2081,
        819 | 820 => 2082,
        846 | 847 => 2083,
        821 | 822 | 823 => 2084,
        848 | 849 => 2085,
        870 => 2086,
        878 | 879 => 2087,
        837 | 838 | 839 => 2088,
        843 | 844 => 2089,
        876 => 2090,
        871 => 2091,
        872 | 873 => 2092,
        859 | 860 | 861 => 2093,
        840 | 841 | 842 | 1011 => 2094,
        854 | 855 => 2095,
        856 | 857 | 858 => 2096,
        874 => 2097,
        875 => 2098,
        885 | 886 | 887 => 2099,
        915 | 916 => 2103,
        917 | 918 => 2104,
        919 | 920 => 2105,
        953 | 954 => 2106,
        971 | 972 => 2107,
        955 | 956 => 2108,
        960 | 961 => 2109,
        978 => 2110,
        976 => 2111,
        963 | 964 => 2112,
        928 | 929 | 930 => 2113,
        951 | 952 => 2114,
        938 | 939 => 2115,
        965 | 966 => 2116,
        968 => 2117,
        924 | 925 => 2118,
        974 | 975 => 2119,
        996 | 997 | 998 => 2120,
        977 => 2121,
        967 => 2122,
        921 | 922 | 923 => 2123,
        940 | 941 => 2126,
        962 => 2127,
        931 => 2128,
        973 => 2129,
        950 => 2130,
        932 | 933 | 934 => 2131,
        969 | 970 => 2132,
        944 | 945 => 2133,
        926 | 927 => 2134,
        942 | 943 => 2135,
        946 | 947 => 2136,
        999 | 1000 => 2137,
        957 | 958 | 959 => 2156,
        935 | 936 | 937 => 2157,
        948 | 949 => 2158,
        194 | 195 | 980 => 2159,
        23 | 24 => 2438,
        27 | 28 => 2439,
        173 | 35 | 36 => 2440,
        37 | 38 => 2441,
        60 | 61 | 62 | 186 => 2442,
        69 | 70 | 71 => 2443,
        74 | 75 | 76 => 2444,
        109 | 110 => 2445,
        446 | 143 => 2446,
        161 | 162 => 2447,
        163 | 164 => 2448,
        167 | 168 => 2449,
        190 | 424 => 2450,
        193 | 469 => 2451,
        207 | 472 => 2452,
        218 | 219 => 2453,
        220 | 221 | 473 => 2454,
        261 | 262 => 2455,
        270 | 271 | 272 => 2456,
        273 | 274 | 275 => 2457,
        299 | 476 => 2458,
        313 => 2459,
        314 => 2460,
        341 | 342 => 2461,
        349 | 350 => 2462,
        355 | 356 | 477 => 2463,
        358 | 433 => 2464,
        532 | 533 | 534 => 2465,
        540 | 541 | 542 => 2466,
        580 | 581 => 2467,
        607 | 608 | 609 => 2468,
        619 | 620 => 2469,
        629 | 630 => 2470,
        703 => 2471,
        708 | 709 => 2472,
        736 | 737 | 738 => 2473,
        742 | 743 => 2474,
        782 | 783 | 784 => 2475,
        845 => 2476,
        877 => 2477,
        1012 | 1013 => 2478,
        43 | 44 | 45 | 182 => 2484,
        72 | 73 => 2485,
        84 | 85 => 2486,
        86 | 87 => 2487,
        102 | 103 => 2488,
        236 | 106 | 107 | 237 => 2489,
        111 | 112 | 464 => 2490,
        116 | 117 | 230 => 2491,
        239 | 125 | 466 => 2492,
        240 | 126 | 467 => 2493,
        131 => 2494,
        137 | 233 | 474 => 2495,
        170 | 171 => 2496,
        209 | 210 => 2497,
        227 => 2498,
        235 => 2499,
        311 => 2500,
        312 => 2501,
        328 | 329 | 330 => 2502,
        374 | 375 | 376 => 2503,
        408 | 409 => 2504,
        410 | 411 => 2505,
        522 | 523 => 2506,
        529 | 530 => 2507,
        546 | 547 => 2508,
        559 | 560 => 2509,
        572 | 573 => 2510,
        577 | 578 | 579 => 2511,
        595 | 596 => 2512,
        622 | 623 => 2513,
        677 | 678 => 2514,
        686 | 687 => 2515,
        731 | 732 | 733 => 2516,
        751 | 752 => 2517,
        764 => 2518,
        774 => 2519,
        868 => 2520,
        884 | 1018 => 2521,
        _ => 0,
    }
}
