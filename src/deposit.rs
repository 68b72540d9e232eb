use crate::random::RandomSource;
use crate::settings::Axis;
use serde::{Deserialize, Serialize};

/// Neighbor offset `(dx, dy, dz)`, each in -1..=1
pub type Offset = (i32, i32, i32);

/// Horizontal offsets favoured by a flat-lying tabular body
const TABULAR_OFFSETS: [Offset; 8] = [
    (1, 0, 0),
    (1, 1, 0),
    (1, -1, 0),
    (-1, 0, 0),
    (-1, 1, 0),
    (-1, -1, 0),
    (0, 1, 0),
    (0, -1, 0),
];

/// Dip directions for a tilted tabular body. x points north, y points east.
const DIPS: [(&str, Offset); 8] = [
    ("N", (1, 0, 1)),
    ("NE", (1, 1, 1)),
    ("NW", (1, -1, 1)),
    ("S", (-1, 0, 1)),
    ("SE", (-1, 1, 1)),
    ("SW", (-1, -1, 1)),
    ("E", (0, 1, 1)),
    ("W", (0, -1, 1)),
];

/// Shape of the deposit, expressed as which neighbor offsets get the boost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepositType {
    /// A fresh preferential axis every wave
    #[default]
    Axis,
    /// No preferred direction
    Blob,
    /// Flat sheet: every horizontal offset
    Tabular,
    /// Sheet dipping in one of eight compass directions
    TiltedTabular,
    /// One random direction and its opposite, re-drawn now and then as it grows
    Vein,
}

impl DepositType {
    pub fn name(&self) -> &str {
        match self {
            DepositType::Axis => "Axis",
            DepositType::Blob => "Blob",
            DepositType::Tabular => "Tabular",
            DepositType::TiltedTabular => "Tilted tabular",
            DepositType::Vein => "Vein",
        }
    }

    /// Whether the bias is drawn again at the start of every wave
    pub fn redraws_per_wave(&self) -> bool {
        matches!(self, DepositType::Axis)
    }

    /// A vein picks a new direction when the draw after a coded cell exceeds this
    pub const VEIN_TURN_THRESHOLD: f64 = 0.9;

    /// Draw the bias for this deposit type
    pub fn draw_bias(&self, rng: &mut RandomSource) -> Bias {
        match self {
            DepositType::Axis => Bias::Axis(Axis::from_index(rng.draw_index(3))),
            DepositType::Blob => Bias::None,
            DepositType::Tabular => Bias::Offsets(TABULAR_OFFSETS.to_vec()),
            DepositType::TiltedTabular => {
                let (name, _) = DIPS[rng.draw_index(DIPS.len())];
                Bias::Offsets(dip_offsets(name))
            }
            DepositType::Vein => {
                let mut component = || rng.draw_index(3) as i32 - 1;
                let dir = (component(), component(), component());
                Bias::Offsets(vec![dir, negate(dir)])
            }
        }
    }
}

/// Which neighbor offsets receive the direction boost
#[derive(Debug, Clone, PartialEq)]
pub enum Bias {
    None,
    /// Any offset that moves along the axis
    Axis(Axis),
    /// Exactly these offsets
    Offsets(Vec<Offset>),
}

impl Bias {
    pub fn favours(&self, dx: i32, dy: i32, dz: i32) -> bool {
        match self {
            Bias::None => false,
            Bias::Axis(axis) => axis.moves_along(dx, dy, dz),
            Bias::Offsets(offsets) => offsets.contains(&(dx, dy, dz)),
        }
    }
}

fn negate((dx, dy, dz): Offset) -> Offset {
    (-dx, -dy, -dz)
}

fn dip_vector(name: &str) -> Offset {
    DIPS.iter()
        .find(|(n, _)| *n == name)
        .map(|(_, o)| *o)
        .unwrap_or((0, 0, 0))
}

/// The dip, its neighbouring dips, one horizontal strike offset, and all their opposites
fn dip_offsets(name: &str) -> Vec<Offset> {
    let dip = dip_vector(name);
    let (dx, dy, dz) = dip;
    let mut offsets = vec![dip];

    if name.len() > 1 {
        // Diagonal dip: both cardinal components plus the strike
        offsets.push(dip_vector(&name[..1]));
        offsets.push(dip_vector(&name[1..]));
        offsets.push((-dx, dy, 0));
    } else if dx == 0 {
        offsets.push((1, dy, dz));
        offsets.push((-1, dy, dz));
        offsets.push((1, 0, 0));
    } else {
        offsets.push((dx, 1, dz));
        offsets.push((dx, -1, dz));
        offsets.push((0, 1, 0));
    }

    let opposites: Vec<Offset> = offsets.iter().copied().map(negate).collect();
    offsets.extend(opposites);
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_favours_nothing() {
        let mut rng = RandomSource::new(1);
        let bias = DepositType::Blob.draw_bias(&mut rng);
        assert_eq!(bias, Bias::None);
        assert!(!bias.favours(1, 0, 0));
    }

    #[test]
    fn test_tabular_favours_horizontal_only() {
        let mut rng = RandomSource::new(1);
        let bias = DepositType::Tabular.draw_bias(&mut rng);
        assert!(bias.favours(1, 1, 0));
        assert!(bias.favours(0, -1, 0));
        assert!(!bias.favours(0, 0, 1));
        assert!(!bias.favours(1, 0, -1));
    }

    #[test]
    fn test_axis_bias_matches_axis() {
        let bias = Bias::Axis(Axis::Z);
        assert!(bias.favours(0, 0, -1));
        assert!(bias.favours(1, 1, 1));
        assert!(!bias.favours(1, 1, 0));
    }

    #[test]
    fn test_diagonal_dip_offsets() {
        let offsets = dip_offsets("NE");
        assert_eq!(
            offsets,
            vec![
                (1, 1, 1),
                (1, 0, 1),
                (0, 1, 1),
                (-1, 1, 0),
                (-1, -1, -1),
                (-1, 0, -1),
                (0, -1, -1),
                (1, -1, 0),
            ]
        );
    }

    #[test]
    fn test_cardinal_dip_offsets() {
        let north = dip_offsets("N");
        assert_eq!(&north[..4], &[(1, 0, 1), (1, 1, 1), (1, -1, 1), (0, 1, 0)]);
        let east = dip_offsets("E");
        assert_eq!(&east[..4], &[(0, 1, 1), (1, 1, 1), (-1, 1, 1), (1, 0, 0)]);
        assert_eq!(east[4], (0, -1, -1));
    }

    #[test]
    fn test_tilted_offsets_are_symmetric() {
        let mut rng = RandomSource::new(9);
        for _ in 0..20 {
            match DepositType::TiltedTabular.draw_bias(&mut rng) {
                Bias::Offsets(offsets) => {
                    assert_eq!(offsets.len(), 8);
                    for &o in &offsets {
                        assert!(offsets.contains(&negate(o)), "{:?} without opposite", o);
                    }
                }
                other => panic!("unexpected bias {:?}", other),
            }
        }
    }

    #[test]
    fn test_vein_is_direction_and_opposite() {
        let mut rng = RandomSource::new(4);
        for _ in 0..20 {
            match DepositType::Vein.draw_bias(&mut rng) {
                Bias::Offsets(offsets) => {
                    assert_eq!(offsets.len(), 2);
                    assert_eq!(offsets[1], negate(offsets[0]));
                    let (dx, dy, dz) = offsets[0];
                    assert!([dx, dy, dz].iter().all(|c| (-1..=1).contains(c)));
                }
                other => panic!("unexpected bias {:?}", other),
            }
        }
    }

    #[test]
    fn test_only_axis_redraws_per_wave() {
        assert!(DepositType::Axis.redraws_per_wave());
        assert!(!DepositType::Vein.redraws_per_wave());
        assert!(!DepositType::Tabular.redraws_per_wave());
    }

    #[test]
    fn test_deposit_type_serializes_kebab_case() {
        let json = serde_json::to_string(&DepositType::TiltedTabular).unwrap();
        assert_eq!(json, "\"tilted-tabular\"");
        let back: DepositType = serde_json::from_str("\"vein\"").unwrap();
        assert_eq!(back, DepositType::Vein);
    }
}
