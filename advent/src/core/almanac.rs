//! Almanac range conversion.
//!
//! An almanac is a chain of category-to-category conversions. Each conversion
//! holds ranges that shift a contiguous block of source values by a constant
//! offset; values outside every range pass through unchanged.
//!
//! Seed ranges are resolved by pushing whole [`Span`]s through the chain
//! instead of enumerating every seed, so the cost depends on the number of
//! ranges rather than the number of seeds.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace, warn};

use crate::core::category::Category;
use crate::core::interval::{Span, coalesce};
use crate::error::AlmanacError;

/// How the `seeds:` line is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Every value is a seed.
    Points,
    /// Values are `(start, length)` pairs.
    Ranges,
}

/// One `dest src len` line: maps `[src, src + len)` onto `[dest, dest + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    source_start: i64,
    dest_start: i64,
    length: i64,
}

impl Range {
    /// `None` if `length` is negative or either end, or the offset, overflows `i64`.
    pub fn try_new(dest_start: i64, source_start: i64, length: i64) -> Option<Self> {
        if length < 0 {
            return None;
        }
        source_start.checked_add(length)?;
        dest_start.checked_add(length)?;
        dest_start.checked_sub(source_start)?;
        Some(Self {
            source_start,
            dest_start,
            length,
        })
    }

    pub fn source_start(&self) -> i64 {
        self.source_start
    }

    pub fn dest_start(&self) -> i64 {
        self.dest_start
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn source(&self) -> Span {
        Span::new(self.source_start, self.source_start + self.length)
    }

    pub fn offset(&self) -> i64 {
        self.dest_start - self.source_start
    }

    fn apply(&self, value: i64) -> Option<i64> {
        self.source().contains(value).then(|| value + self.offset())
    }
}

/// Ranges mapping one category onto the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    source: Category,
    destination: Category,
    ranges: Vec<Range>,
}

impl Conversion {
    pub fn new(source: Category, destination: Category, ranges: Vec<Range>) -> Self {
        Self {
            source,
            destination,
            ranges,
        }
    }

    pub fn source(&self) -> Category {
        self.source
    }

    pub fn destination(&self) -> Category {
        self.destination
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Map one value. The first range containing it wins; no match is identity.
    pub fn convert(&self, value: i64) -> i64 {
        self.ranges
            .iter()
            .find_map(|range| range.apply(value))
            .unwrap_or(value)
    }

    /// Map a span, splitting it at every range boundary it crosses.
    ///
    /// Pieces claimed by an earlier range are not offered to later ones, so
    /// overlapping ranges resolve the same way [`Conversion::convert`] does.
    pub fn convert_span(&self, span: Span) -> Vec<Span> {
        let mut pending = vec![span];
        let mut mapped = Vec::new();
        for range in &self.ranges {
            if pending.is_empty() {
                break;
            }
            let mut unclaimed = Vec::with_capacity(pending.len() + 1);
            for piece in pending {
                match piece.intersection(range.source()) {
                    Some(hit) => {
                        mapped.push(hit.shift(range.offset()));
                        let (left, right) = piece.difference(hit);
                        unclaimed.extend(left);
                        unclaimed.extend(right);
                    }
                    None => unclaimed.push(piece),
                }
            }
            pending = unclaimed;
        }
        mapped.extend(pending);
        mapped
    }
}

/// Seeds plus conversions keyed by source category. Read-only once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Almanac {
    seeds: Vec<i64>,
    conversions: BTreeMap<Category, Conversion>,
}

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)-to-([a-z]+) map:$").unwrap());

impl Almanac {
    /// Build an almanac directly. A later conversion for the same source replaces an earlier one.
    pub fn new(seeds: Vec<i64>, conversions: impl IntoIterator<Item = Conversion>) -> Self {
        let mut almanac = Self {
            seeds,
            conversions: BTreeMap::new(),
        };
        for conversion in conversions {
            almanac.insert(conversion);
        }
        almanac
    }

    /// Parse the `seeds:` line followed by `<src>-to-<dst> map:` blocks.
    pub fn parse(input: &str) -> Result<Self, AlmanacError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()));

        let seeds = match lines.next() {
            Some((number, line)) => parse_seeds(number, line)?,
            None => {
                return Err(AlmanacError::MissingSeeds {
                    line: 1,
                    text: String::new(),
                });
            }
        };

        let mut almanac = Almanac {
            seeds,
            conversions: BTreeMap::new(),
        };
        let mut current: Option<Conversion> = None;
        for (number, line) in lines {
            if line.is_empty() {
                if let Some(conversion) = current.take() {
                    almanac.insert(conversion);
                }
                continue;
            }
            if line.ends_with("map:") {
                if let Some(conversion) = current.take() {
                    almanac.insert(conversion);
                }
                current = Some(parse_header(number, line)?);
                continue;
            }
            let Some(conversion) = current.as_mut() else {
                return Err(AlmanacError::InvalidHeader {
                    line: number,
                    text: line.to_string(),
                });
            };
            conversion.ranges.push(parse_range(number, line)?);
        }
        if let Some(conversion) = current {
            almanac.insert(conversion);
        }

        debug!(
            seeds = almanac.seeds.len(),
            conversions = almanac.conversions.len(),
            "parsed almanac"
        );
        Ok(almanac)
    }

    fn insert(&mut self, conversion: Conversion) {
        let source = conversion.source;
        if self.conversions.insert(source, conversion).is_some() {
            warn!(%source, "duplicate map header replaces earlier conversion");
        }
    }

    pub fn seeds(&self) -> &[i64] {
        &self.seeds
    }

    pub fn conversion(&self, source: Category) -> Option<&Conversion> {
        self.conversions.get(&source)
    }

    pub fn conversions(&self) -> impl Iterator<Item = &Conversion> {
        self.conversions.values()
    }

    /// Apply the single conversion registered for `from`.
    pub fn convert(&self, value: i64, from: Category) -> Result<(Category, i64), AlmanacError> {
        let conversion = self.lookup(from)?;
        Ok((conversion.destination, conversion.convert(value)))
    }

    /// Follow conversions from `from` until reaching `to`.
    pub fn convert_to(
        &self,
        value: i64,
        from: Category,
        to: Category,
    ) -> Result<i64, AlmanacError> {
        self.walk_chain(from, to, value, |conversion, value| {
            let next = conversion.convert(value);
            trace!(
                from = %conversion.source,
                to = %conversion.destination,
                value,
                next,
                "convert"
            );
            next
        })
    }

    /// Apply the conversion for `from` to a whole span.
    pub fn convert_span(
        &self,
        span: Span,
        from: Category,
    ) -> Result<(Category, Vec<Span>), AlmanacError> {
        let conversion = self.lookup(from)?;
        Ok((conversion.destination, conversion.convert_span(span)))
    }

    /// Push spans through the chain from `from` to `to`, merging pieces after each step.
    pub fn convert_spans_to(
        &self,
        spans: Vec<Span>,
        from: Category,
        to: Category,
    ) -> Result<Vec<Span>, AlmanacError> {
        self.walk_chain(from, to, spans, |conversion, spans| {
            let next = coalesce(
                spans
                    .into_iter()
                    .flat_map(|span| conversion.convert_span(span))
                    .collect(),
            );
            trace!(
                from = %conversion.source,
                to = %conversion.destination,
                spans = next.len(),
                "convert spans"
            );
            next
        })
    }

    /// Seed values read as `(start, length)` pairs.
    pub fn seed_spans(&self) -> Result<Vec<Span>, AlmanacError> {
        if !self.seeds.len().is_multiple_of(2) {
            return Err(AlmanacError::UnpairedSeedRanges {
                count: self.seeds.len(),
            });
        }
        let spans = self
            .seeds
            .chunks_exact(2)
            .map(|pair| {
                Span::from_len(pair[0], pair[1]).ok_or(AlmanacError::InvalidSeedRange {
                    start: pair[0],
                    length: pair[1],
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(coalesce(spans))
    }

    /// Smallest location reachable from the declared seeds.
    pub fn lowest_location(&self, mode: SeedMode) -> Result<i64, AlmanacError> {
        match mode {
            SeedMode::Points => {
                let mut lowest: Option<i64> = None;
                for &seed in &self.seeds {
                    let location = self.convert_to(seed, Category::Seed, Category::Location)?;
                    lowest = Some(lowest.map_or(location, |low| low.min(location)));
                }
                lowest.ok_or(AlmanacError::NoSeeds)
            }
            SeedMode::Ranges => {
                let seeds = self.seed_spans()?;
                debug!(spans = seeds.len(), "propagating seed ranges");
                let locations = self.convert_spans_to(seeds, Category::Seed, Category::Location)?;
                locations
                    .iter()
                    .map(Span::start)
                    .min()
                    .ok_or(AlmanacError::NoSeeds)
            }
        }
    }

    /// Same answer as [`Almanac::lowest_location`], converting every seed one at a time.
    ///
    /// Linear in the total seed count; only practical for small inputs.
    pub fn lowest_location_brute_force(&self, mode: SeedMode) -> Result<i64, AlmanacError> {
        if mode == SeedMode::Points {
            return self.lowest_location(mode);
        }
        let mut lowest: Option<i64> = None;
        for span in self.seed_spans()? {
            for seed in span.start()..span.end() {
                let location = self.convert_to(seed, Category::Seed, Category::Location)?;
                lowest = Some(lowest.map_or(location, |low| low.min(location)));
            }
        }
        lowest.ok_or(AlmanacError::NoSeeds)
    }

    fn lookup(&self, category: Category) -> Result<&Conversion, AlmanacError> {
        self.conversions
            .get(&category)
            .ok_or(AlmanacError::ConverterNotFound(category))
    }

    /// Fold `state` through each conversion between `from` and `to`.
    ///
    /// A chain can visit each source category at most once, so more steps than
    /// registered conversions means it loops without reaching `to`.
    fn walk_chain<T>(
        &self,
        from: Category,
        to: Category,
        mut state: T,
        mut step: impl FnMut(&Conversion, T) -> T,
    ) -> Result<T, AlmanacError> {
        let mut category = from;
        for _ in 0..=self.conversions.len() {
            if category == to {
                return Ok(state);
            }
            let conversion = self.lookup(category)?;
            state = step(conversion, state);
            category = conversion.destination;
        }
        Err(AlmanacError::ConversionCycle { from, to })
    }
}

fn parse_seeds(number: usize, line: &str) -> Result<Vec<i64>, AlmanacError> {
    let Some(values) = line.strip_prefix("seeds:") else {
        return Err(AlmanacError::MissingSeeds {
            line: number,
            text: line.to_string(),
        });
    };
    values
        .split_whitespace()
        .map(|token| parse_number(number, token, line))
        .collect()
}

fn parse_header(number: usize, line: &str) -> Result<Conversion, AlmanacError> {
    let caps = HEADER_RE
        .captures(line)
        .ok_or_else(|| AlmanacError::InvalidHeader {
            line: number,
            text: line.to_string(),
        })?;
    let category = |index: usize| {
        let name = &caps[index];
        name.parse::<Category>()
            .map_err(|_| AlmanacError::UnknownCategory {
                line: number,
                name: name.to_string(),
            })
    };
    Ok(Conversion::new(category(1)?, category(2)?, Vec::new()))
}

fn parse_range(number: usize, line: &str) -> Result<Range, AlmanacError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [dest, source, length] = fields.as_slice() else {
        return Err(AlmanacError::InvalidMapping {
            line: number,
            text: line.to_string(),
        });
    };
    let dest = parse_number(number, dest, line)?;
    let source = parse_number(number, source, line)?;
    let length = parse_number(number, length, line)?;
    Range::try_new(dest, source, length).ok_or_else(|| AlmanacError::InvalidRange {
        line: number,
        text: line.to_string(),
    })
}

fn parse_number(number: usize, token: &str, line: &str) -> Result<i64, AlmanacError> {
    token.parse().map_err(|_| AlmanacError::InvalidNumber {
        line: number,
        token: token.to_string(),
        text: line.to_string(),
    })
}

/// Writes the almanac back in its input format.
impl fmt::Display for Almanac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seeds:")?;
        for seed in &self.seeds {
            write!(f, " {seed}")?;
        }
        writeln!(f)?;
        for conversion in self.conversions.values() {
            writeln!(f)?;
            writeln!(
                f,
                "{}-to-{} map:",
                conversion.source, conversion.destination
            )?;
            for range in &conversion.ranges {
                writeln!(
                    f,
                    "{} {} {}",
                    range.dest_start(), range.source_start(), range.length()
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ALMANAC_SAMPLE;

    fn range(dest: i64, source: i64, length: i64) -> Range {
        Range::try_new(dest, source, length).expect("valid range")
    }

    fn seed_to_soil() -> Almanac {
        Almanac::new(
            vec![79, 14, 55, 13],
            [Conversion::new(
                Category::Seed,
                Category::Soil,
                vec![range(50, 98, 2), range(52, 50, 48)],
            )],
        )
    }

    #[test]
    fn convert_shifts_inside_ranges_and_passes_through_outside() {
        let almanac = seed_to_soil();
        for (seed, soil) in [(79, 81), (14, 14), (55, 57), (13, 13), (98, 50), (99, 51)] {
            assert_eq!(
                almanac.convert(seed, Category::Seed).expect("convert"),
                (Category::Soil, soil)
            );
        }
    }

    #[test]
    fn convert_is_exact_shift_across_whole_range() {
        let conversion = Conversion::new(Category::Seed, Category::Soil, vec![range(52, 50, 48)]);
        for value in 40..110 {
            let expected = if (50..98).contains(&value) {
                value + 2
            } else {
                value
            };
            assert_eq!(conversion.convert(value), expected, "value {value}");
        }
    }

    #[test]
    fn convert_to_same_category_is_identity() {
        let almanac = Almanac::default();
        assert_eq!(
            almanac
                .convert_to(42, Category::Soil, Category::Soil)
                .expect("identity"),
            42
        );
    }

    #[test]
    fn convert_to_reports_missing_converter() {
        let err = seed_to_soil()
            .convert_to(79, Category::Seed, Category::Fertilizer)
            .expect_err("no soil conversion");
        assert_eq!(err, AlmanacError::ConverterNotFound(Category::Soil));
        assert_eq!(err.to_string(), "converter not found for \"soil\"");
    }

    #[test]
    fn convert_to_detects_cycles() {
        let almanac = Almanac::new(
            Vec::new(),
            [
                Conversion::new(Category::Seed, Category::Soil, Vec::new()),
                Conversion::new(Category::Soil, Category::Seed, Vec::new()),
            ],
        );
        let err = almanac
            .convert_to(1, Category::Seed, Category::Location)
            .expect_err("cycle");
        assert_eq!(
            err,
            AlmanacError::ConversionCycle {
                from: Category::Seed,
                to: Category::Location
            }
        );
    }

    #[test]
    fn parses_sample() {
        let almanac = Almanac::parse(ALMANAC_SAMPLE).expect("parse");
        assert_eq!(almanac.seeds(), &[79, 14, 55, 13]);
        assert_eq!(almanac.conversions().count(), 7);
        for source in &Category::ALL[..7] {
            assert!(almanac.conversion(*source).is_some(), "{source}");
        }
        let fertilizer = almanac.conversion(Category::Fertilizer).expect("fertilizer");
        assert_eq!(fertilizer.destination(), Category::Water);
        assert_eq!(fertilizer.ranges().len(), 4);
    }

    #[test]
    fn sample_seeds_reach_expected_locations() {
        let almanac = Almanac::parse(ALMANAC_SAMPLE).expect("parse");
        for (seed, location) in [(79, 82), (14, 43), (55, 86), (13, 35)] {
            assert_eq!(
                almanac
                    .convert_to(seed, Category::Seed, Category::Location)
                    .expect("convert"),
                location
            );
        }
        assert_eq!(almanac.lowest_location(SeedMode::Points).expect("lowest"), 35);
    }

    #[test]
    fn range_mode_matches_brute_force_on_sample() {
        let almanac = Almanac::parse(ALMANAC_SAMPLE).expect("parse");
        assert_eq!(almanac.lowest_location(SeedMode::Ranges).expect("spans"), 46);
        assert_eq!(
            almanac
                .lowest_location_brute_force(SeedMode::Ranges)
                .expect("brute force"),
            46
        );
    }

    #[test]
    fn convert_span_splits_at_range_boundaries() {
        let conversion = Conversion::new(
            Category::Seed,
            Category::Soil,
            vec![range(50, 98, 2), range(52, 50, 48)],
        );
        let mut pieces = conversion.convert_span(Span::new(45, 100));
        pieces.sort();
        assert_eq!(
            pieces,
            vec![Span::new(45, 50), Span::new(50, 52), Span::new(52, 100)]
        );
    }

    #[test]
    fn overlapping_ranges_keep_first_match() {
        let conversion = Conversion::new(
            Category::Seed,
            Category::Soil,
            vec![range(100, 0, 10), range(200, 5, 10)],
        );
        assert_eq!(conversion.convert(7), 107);
        assert_eq!(conversion.convert(12), 207);

        let mut pieces = conversion.convert_span(Span::new(0, 15));
        pieces.sort();
        assert_eq!(pieces, vec![Span::new(100, 110), Span::new(205, 210)]);
    }

    #[test]
    fn duplicate_header_last_wins() {
        let input = "seeds: 1\n\nseed-to-soil map:\n10 1 1\n\nseed-to-soil map:\n20 1 1\n";
        let almanac = Almanac::parse(input).expect("parse");
        assert_eq!(almanac.convert(1, Category::Seed).expect("convert").1, 20);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let almanac = Almanac::parse(ALMANAC_SAMPLE).expect("parse");
        let reparsed = Almanac::parse(&almanac.to_string()).expect("reparse");
        assert_eq!(reparsed, almanac);
    }

    #[test]
    fn rejects_structural_errors() {
        let cases = [
            ("", "expected `seeds:`"),
            ("seed: 1 2\n", "expected `seeds:`"),
            ("seeds: 1 x\n", "invalid number \"x\""),
            ("seeds: 1\n\nseed-soil map:\n1 2 3\n", "invalid map header"),
            ("seeds: 1\n\nseed-to-dirt map:\n1 2 3\n", "unknown category \"dirt\""),
            ("seeds: 1\n\nseed-to-soil map:\n1 2\n", "three integers"),
            ("seeds: 1\n\nseed-to-soil map:\n1 2 3 4\n", "three integers"),
            ("seeds: 1\n\nseed-to-soil map:\n1 two 3\n", "invalid number \"two\""),
            ("seeds: 1\n\nseed-to-soil map:\n1 2 -3\n", "range out of bounds"),
            ("seeds: 1\n\n1 2 3\n", "invalid map header"),
        ];
        for (input, expected) in cases {
            let err = Almanac::parse(input).expect_err(input);
            assert!(
                err.to_string().contains(expected),
                "{input:?}: {err} does not mention {expected:?}"
            );
        }
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let err = Almanac::parse("seeds: 1\n\nseed-to-soil map:\n1 2\n").expect_err("short");
        assert_eq!(
            err,
            AlmanacError::InvalidMapping {
                line: 4,
                text: "1 2".to_string()
            }
        );
    }

    #[test]
    fn range_mode_rejects_unpaired_seeds() {
        let almanac = Almanac::parse("seeds: 1 2 3\n").expect("parse");
        assert_eq!(
            almanac.lowest_location(SeedMode::Ranges),
            Err(AlmanacError::UnpairedSeedRanges { count: 3 })
        );
    }

    #[test]
    fn no_seeds_has_no_lowest_location() {
        let almanac = Almanac::parse(ALMANAC_SAMPLE.replace("79 14 55 13", "").as_str())
            .expect("parse");
        assert_eq!(
            almanac.lowest_location(SeedMode::Points),
            Err(AlmanacError::NoSeeds)
        );
        assert_eq!(
            almanac.lowest_location(SeedMode::Ranges),
            Err(AlmanacError::NoSeeds)
        );
    }
}
