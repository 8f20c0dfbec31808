//! Standard property function types.
//!
//! These types implement [`CombinationProperty`] and are combined into a
//! [`PropertyPipeline`](crate::pipeline::PropertyPipeline) in the order returned by
//! [`standard_properties`].

use std::{collections::BTreeMap, fmt};

use super::{BoxPosition, PropertyConfig, PropertyError, PropertyInput, PropertyValue};

/// Box sizes used by [`Boxes`] in the standard pipeline.
pub const STANDARD_BOX_SIZES: [u64; 3] = [10, 100, 1000];

const LEVEL_WIDTH: u32 = 10;

#[must_use]
pub fn standard_properties(config: &PropertyConfig) -> Vec<BoxedCombinationProperty> {
    vec![
        Box::new(LevelKey::new(config.population_size)),
        Box::new(LevelMembers::new(config.population_size)),
        Box::new(SequenceKey),
        Box::new(PrimeCount),
        Box::new(Boxes::new(STANDARD_BOX_SIZES.to_vec())),
    ]
}

pub trait CombinationProperty: fmt::Debug + Send + Sync {
    /// Output key the value is stored under.
    #[must_use]
    fn id(&self) -> &str;
    #[must_use]
    fn name(&self) -> &str;
    #[must_use]
    fn clone_boxed(&self) -> BoxedCombinationProperty;
    fn compute(&self, input: &PropertyInput<'_>) -> Result<PropertyValue, PropertyError>;
}

pub type BoxedCombinationProperty = Box<dyn CombinationProperty>;

impl Clone for BoxedCombinationProperty {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl CombinationProperty for BoxedCombinationProperty {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn clone_boxed(&self) -> BoxedCombinationProperty {
        self.as_ref().clone_boxed()
    }

    fn compute(&self, input: &PropertyInput<'_>) -> Result<PropertyValue, PropertyError> {
        self.as_ref().compute(input)
    }
}

/// Groups members into `population_size / 10 + 1` level bands of width 10.
///
/// Band 1 holds `0..=10`, band 2 `11..=20`, and so on. Members above the last band
/// belong to no band.
fn level_bands(population_size: u32, numbers: &[u32]) -> Vec<Vec<u32>> {
    let band_count = population_size / LEVEL_WIDTH + 1;
    let mut bands = vec![vec![]; band_count as usize];
    for &n in numbers {
        let band = n.saturating_sub(1) / LEVEL_WIDTH;
        if band < band_count {
            bands[band as usize].push(n);
        }
    }
    bands
}

fn join<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Number of members in each level band, joined with `-`.
///
/// With `population_size = 28` there are three bands (`0..=10`, `11..=20`, `21..=30`),
/// so `[1, 8, 11, 14, 22, 54]` becomes `"2-2-1"`. `54` lies above the last band
/// and is not counted.
#[derive(Debug, Clone)]
pub struct LevelKey {
    population_size: u32,
}

impl LevelKey {
    #[must_use]
    pub fn new(population_size: u32) -> Self {
        Self { population_size }
    }
}

impl CombinationProperty for LevelKey {
    fn id(&self) -> &'static str {
        "level_key"
    }
    fn name(&self) -> &'static str {
        "Level Key"
    }
    fn clone_boxed(&self) -> BoxedCombinationProperty {
        Box::new(self.clone())
    }
    fn compute(&self, input: &PropertyInput<'_>) -> Result<PropertyValue, PropertyError> {
        let bands = level_bands(self.population_size, input.numbers);
        Ok(join(bands.iter().map(Vec::len)).into())
    }
}

/// Members of each non-empty level band.
///
/// Each band becomes a single-key map labelled `LkMNN` (1-based, two digits) whose
/// value is the band's members joined with `-`:
/// `[1, 8, 11, 14, 22]` becomes `[{"LkM01": "1-8"}, {"LkM02": "11-14"}, {"LkM03": "22"}]`.
#[derive(Debug, Clone)]
pub struct LevelMembers {
    population_size: u32,
}

impl LevelMembers {
    #[must_use]
    pub fn new(population_size: u32) -> Self {
        Self { population_size }
    }
}

impl CombinationProperty for LevelMembers {
    fn id(&self) -> &'static str {
        "level_members"
    }
    fn name(&self) -> &'static str {
        "Level Members"
    }
    fn clone_boxed(&self) -> BoxedCombinationProperty {
        Box::new(self.clone())
    }
    fn compute(&self, input: &PropertyInput<'_>) -> Result<PropertyValue, PropertyError> {
        let members = level_bands(self.population_size, input.numbers)
            .into_iter()
            .enumerate()
            .filter(|(_, band)| !band.is_empty())
            .map(|(i, band)| BTreeMap::from([(format!("LkM{:02}", i + 1), join(band))]))
            .collect();
        Ok(PropertyValue::Members(members))
    }
}

/// Lengths of the maximal runs of consecutive members, joined with `-`.
///
/// `[1, 2, 3, 7, 9, 10]` has runs `{1, 2, 3}`, `{7}`, `{9, 10}` and becomes `"3-1-2"`.
#[derive(Debug, Clone)]
pub struct SequenceKey;

impl CombinationProperty for SequenceKey {
    fn id(&self) -> &'static str {
        "sequence_key"
    }
    fn name(&self) -> &'static str {
        "Sequence Key"
    }
    fn clone_boxed(&self) -> BoxedCombinationProperty {
        Box::new(self.clone())
    }
    fn compute(&self, input: &PropertyInput<'_>) -> Result<PropertyValue, PropertyError> {
        let mut sorted = input.numbers.to_vec();
        sorted.sort_unstable();
        let runs = sorted
            .chunk_by(|a, b| a.checked_add(1) == Some(*b))
            .map(<[u32]>::len);
        Ok(join(runs).into())
    }
}

/// Number of prime members, as a decimal string.
#[derive(Debug, Clone)]
pub struct PrimeCount;

fn is_prime(n: u32) -> bool {
    n > 1 && (2..).take_while(|d| u64::from(*d) * u64::from(*d) <= u64::from(n)).all(|d| n % d != 0)
}

impl CombinationProperty for PrimeCount {
    fn id(&self) -> &'static str {
        "prime_count"
    }
    fn name(&self) -> &'static str {
        "Prime Count"
    }
    fn clone_boxed(&self) -> BoxedCombinationProperty {
        Box::new(self.clone())
    }
    fn compute(&self, input: &PropertyInput<'_>) -> Result<PropertyValue, PropertyError> {
        let count = input.numbers.iter().filter(|&&n| is_prime(n)).count();
        Ok(count.to_string().into())
    }
}

/// Nested containment coordinates of the record index.
///
/// For each box size: `box_number = (index - 1) / size + 1` and
/// `position_in_box = (index - 1) % size + 1`. Independent of the members.
#[derive(Debug, Clone)]
pub struct Boxes {
    sizes: Vec<u64>,
}

impl Boxes {
    #[must_use]
    pub fn new(sizes: Vec<u64>) -> Self {
        Self { sizes }
    }
}

impl CombinationProperty for Boxes {
    fn id(&self) -> &'static str {
        "boxes"
    }
    fn name(&self) -> &'static str {
        "Boxes"
    }
    fn clone_boxed(&self) -> BoxedCombinationProperty {
        Box::new(self.clone())
    }
    fn compute(&self, input: &PropertyInput<'_>) -> Result<PropertyValue, PropertyError> {
        let offset = input
            .index
            .checked_sub(1)
            .ok_or(PropertyError::InvalidIndex { index: input.index })?;
        let positions = self
            .sizes
            .iter()
            .map(|&size| {
                if size == 0 {
                    return Err(PropertyError::ZeroBoxSize);
                }
                Ok(BoxPosition {
                    size,
                    box_number: offset / size + 1,
                    position_in_box: offset % size + 1,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(PropertyValue::Boxes(positions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute<P>(property: &P, numbers: &[u32]) -> PropertyValue
    where
        P: CombinationProperty,
    {
        property
            .compute(&PropertyInput { index: 1, numbers })
            .unwrap()
    }

    fn text(value: &str) -> PropertyValue {
        PropertyValue::Text(value.to_owned())
    }

    const SAMPLE: [u32; 6] = [1, 8, 11, 14, 22, 54];

    #[test]
    fn test_level_key_default_population() {
        assert_eq!(compute(&LevelKey::new(28), &SAMPLE), text("2-2-1"));
    }

    #[test]
    fn test_level_key_band_count_follows_population_size() {
        assert_eq!(compute(&LevelKey::new(39), &SAMPLE), text("2-2-1-0"));
        assert_eq!(compute(&LevelKey::new(56), &SAMPLE), text("2-2-1-0-0-1"));
    }

    #[test]
    fn test_level_key_covers_whole_last_band() {
        assert_eq!(compute(&LevelKey::new(28), &[0, 1, 2, 21, 29, 30]), text("3-0-3"));
        assert_eq!(compute(&LevelKey::new(28), &[10, 11, 30, 31]), text("1-1-1"));
    }

    #[test]
    fn test_level_key_bands_sum_to_size_for_covered_members() {
        let numbers = [0, 5, 10, 11, 20, 21, 25, 30];
        let PropertyValue::Text(key) = compute(&LevelKey::new(28), &numbers) else {
            panic!("level_key must be text");
        };
        let total = key.split('-').map(|c| c.parse::<usize>().unwrap()).sum::<usize>();
        assert_eq!(total, numbers.len());
        assert_eq!(key, "3-2-3");
    }

    #[test]
    fn test_level_key_bands_sum_to_size_inside_population() {
        let numbers = [3, 10, 11, 20, 21, 28];
        let PropertyValue::Text(key) = compute(&LevelKey::new(28), &numbers) else {
            panic!("level_key must be text");
        };
        let total = key.split('-').map(|c| c.parse::<usize>().unwrap()).sum::<usize>();
        assert_eq!(total, numbers.len());
        assert_eq!(key, "2-2-2");
    }

    #[test]
    fn test_level_members_skips_empty_bands() {
        let value = compute(&LevelMembers::new(56), &SAMPLE);
        let expected = PropertyValue::Members(vec![
            BTreeMap::from([("LkM01".to_owned(), "1-8".to_owned())]),
            BTreeMap::from([("LkM02".to_owned(), "11-14".to_owned())]),
            BTreeMap::from([("LkM03".to_owned(), "22".to_owned())]),
            BTreeMap::from([("LkM06".to_owned(), "54".to_owned())]),
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_level_members_ignores_members_above_last_band() {
        let value = compute(&LevelMembers::new(28), &SAMPLE);
        assert_eq!(
            value.render(),
            r#"[{"LkM01":"1-8"},{"LkM02":"11-14"},{"LkM03":"22"}]"#
        );
    }

    #[test]
    fn test_level_members_keeps_band_edges() {
        let value = compute(&LevelMembers::new(28), &[0, 1, 2, 21, 29, 30]);
        assert_eq!(value.render(), r#"[{"LkM01":"0-1-2"},{"LkM03":"21-29-30"}]"#);
    }

    #[test]
    fn test_sequence_key() {
        assert_eq!(compute(&SequenceKey, &[1, 2, 3, 7, 9, 10]), text("3-1-2"));
        assert_eq!(compute(&SequenceKey, &[10, 9, 1, 7, 3, 2]), text("3-1-2"));
        assert_eq!(compute(&SequenceKey, &[5]), text("1"));
        assert_eq!(compute(&SequenceKey, &[4, 5, 6, 7]), text("4"));
    }

    #[test]
    fn test_prime_count() {
        assert_eq!(compute(&PrimeCount, &[1, 2, 3, 4, 9, 25, 29]), text("3"));
        assert_eq!(compute(&PrimeCount, &[0, 1, 4]), text("0"));
    }

    #[test]
    fn test_is_prime() {
        let primes = (0..30).filter(|&n| is_prime(n)).collect::<Vec<_>>();
        assert_eq!(primes, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(4_294_967_291));
    }

    #[test]
    fn test_boxes_coordinates() {
        let boxes = Boxes::new(STANDARD_BOX_SIZES.to_vec());
        let value = boxes
            .compute(&PropertyInput {
                index: 1234,
                numbers: &[],
            })
            .unwrap();
        assert_eq!(
            value,
            PropertyValue::Boxes(vec![
                BoxPosition {
                    size: 10,
                    box_number: 124,
                    position_in_box: 4
                },
                BoxPosition {
                    size: 100,
                    box_number: 13,
                    position_in_box: 34
                },
                BoxPosition {
                    size: 1000,
                    box_number: 2,
                    position_in_box: 234
                },
            ])
        );
    }

    #[test]
    fn test_boxes_first_and_boundary_index() {
        let boxes = Boxes::new(vec![10]);
        let at = |index| boxes.compute(&PropertyInput { index, numbers: &[] }).unwrap();
        let position = |box_number, position_in_box| {
            PropertyValue::Boxes(vec![BoxPosition {
                size: 10,
                box_number,
                position_in_box,
            }])
        };
        assert_eq!(at(1), position(1, 1));
        assert_eq!(at(10), position(1, 10));
        assert_eq!(at(11), position(2, 1));
    }

    #[test]
    fn test_boxes_rejects_index_zero() {
        let result = Boxes::new(vec![10]).compute(&PropertyInput {
            index: 0,
            numbers: &[],
        });
        assert_eq!(result, Err(PropertyError::InvalidIndex { index: 0 }));
    }

    #[test]
    fn test_standard_properties_order() {
        let ids = standard_properties(&PropertyConfig::default())
            .iter()
            .map(|p| p.id().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            ids,
            ["level_key", "level_members", "sequence_key", "prime_count", "boxes"]
        );
    }
}
