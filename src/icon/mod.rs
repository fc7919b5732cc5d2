//! Plate-of-food icon composition.
//!
//! Every coordinate is derived from the icon `size` by integer division, so
//! the same size always yields the same shapes. The vector and raster
//! back-ends both walk the [`Composition`] built here.

pub mod raster;
pub mod svg;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One render request: an edge length and where to write the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub size: u32,
    pub output_path: PathBuf,
}

impl IconSpec {
    pub fn new(size: u32, output_path: impl AsRef<Path>) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            size,
            output_path: output_path.as_ref().to_path_buf(),
        })
    }
}

pub(crate) fn check_size(size: u32) -> Result<()> {
    if size == 0 {
        return Err(Error::InvalidSize(size));
    }
    Ok(())
}

/// Opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#RRGGBB`, upper-case.
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.0, self.1, self.2, 0xFF])
    }
}

/// Fixed colours per semantic role. Food groups carry a few shades.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Rgb,
    pub plate: Rgb,
    pub plate_border: Rgb,
    pub green: Rgb,
    pub green_light: Rgb,
    pub red: Rgb,
    pub red_light: Rgb,
    pub red_pale: Rgb,
    /// Flat red used for the whole red group in bitmaps.
    pub tomato: Rgb,
    pub yellow: Rgb,
    pub yellow_light: Rgb,
    pub brown: Rgb,
}

pub const PALETTE: Palette = Palette {
    background: Rgb(0x21, 0x96, 0xF3),
    plate: Rgb(0xFF, 0xFF, 0xFF),
    plate_border: Rgb(0x19, 0x76, 0xD2),
    green: Rgb(0x4C, 0xAF, 0x50),
    green_light: Rgb(0x66, 0xBB, 0x6A),
    red: Rgb(0xFF, 0x57, 0x22),
    red_light: Rgb(0xFF, 0x70, 0x43),
    red_pale: Rgb(0xFF, 0x8A, 0x65),
    tomato: Rgb(0xF4, 0x43, 0x36),
    yellow: Rgb(0xFF, 0xC1, 0x07),
    yellow_light: Rgb(0xFF, 0xD5, 0x4F),
    brown: Rgb(0x79, 0x55, 0x48),
};

/// Divisors of `size` for the fixed parts of the icon.
#[derive(Debug, Clone, Copy)]
pub struct Proportions {
    pub corner: u32,
    pub plate: u32,
    pub outline: u32,
}

pub const PROPORTIONS: Proportions = Proportions {
    corner: 6,
    plate: 3,
    outline: 128,
};

impl Proportions {
    /// Plate outline width, never thinner than `min`.
    pub fn outline_width(&self, size: u32, min: u32) -> u32 {
        (size / self.outline).max(min)
    }
}

/// What a shape depicts. Food roles double as colour groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    Plate,
    Green,
    Red,
    Yellow,
    Brown,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Background => "Background",
            Role::Plate => "Plate",
            Role::Green => "Green vegetables",
            Role::Red => "Red vegetables",
            Role::Yellow => "Yellow protein",
            Role::Brown => "Brown carbs",
        }
    }

    pub fn is_food(self) -> bool {
        !matches!(self, Role::Background | Role::Plate)
    }
}

/// Geometry in absolute pixels (or viewport units).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    RoundedRect {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        radius: i64,
    },
    Circle {
        cx: i64,
        cy: i64,
        r: i64,
    },
    Ellipse {
        cx: i64,
        cy: i64,
        rx: i64,
        ry: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub role: Role,
    pub shape: Shape,
    pub fill: Rgb,
    /// Outline colour; the width is chosen per back-end.
    pub stroke: Option<Rgb>,
}

/// A signed divisor of `size`: `-8` means `-(size / 8)`, `0` means no offset.
type Frac = i32;

fn frac(size: u32, d: Frac) -> i64 {
    if d == 0 {
        return 0;
    }
    let v = i64::from(size / d.unsigned_abs());
    if d < 0 {
        -v
    } else {
        v
    }
}

enum FoodShape {
    Ellipse { rx: u32, ry: u32 },
    Circle { r: u32 },
}

struct Food {
    role: Role,
    dx: Frac,
    dy: Frac,
    shape: FoodShape,
    fill: Rgb,
}

// Offsets are relative to the plate centre.
const FOOD: [Food; 8] = [
    Food { role: Role::Green, dx: -8, dy: -12, shape: FoodShape::Ellipse { rx: 15, ry: 20 }, fill: PALETTE.green },
    Food { role: Role::Green, dx: -10, dy: 0, shape: FoodShape::Ellipse { rx: 18, ry: 25 }, fill: PALETTE.green_light },
    Food { role: Role::Green, dx: -6, dy: 15, shape: FoodShape::Ellipse { rx: 20, ry: 28 }, fill: PALETTE.green },
    Food { role: Role::Red, dx: 8, dy: -10, shape: FoodShape::Circle { r: 25 }, fill: PALETTE.red },
    Food { role: Role::Red, dx: 7, dy: 0, shape: FoodShape::Circle { r: 30 }, fill: PALETTE.red_light },
    Food { role: Role::Red, dx: 6, dy: 12, shape: FoodShape::Circle { r: 35 }, fill: PALETTE.red_pale },
    Food { role: Role::Yellow, dx: 0, dy: 8, shape: FoodShape::Ellipse { rx: 15, ry: 20 }, fill: PALETTE.yellow },
    Food { role: Role::Yellow, dx: -15, dy: 6, shape: FoodShape::Ellipse { rx: 18, ry: 25 }, fill: PALETTE.yellow_light },
];

/// Brown carb bar: x/y offsets, width, height, corner radius as divisors.
const BROWN_BAR: [u32; 5] = [20, 12, 20, 35, 60];

/// The full icon for one size, back-to-front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub size: u32,
    pub items: Vec<Item>,
}

impl Composition {
    pub fn for_size(size: u32) -> Self {
        let s = i64::from(size);
        let center = s / 2;
        let mut items = Vec::with_capacity(FOOD.len() + 3);

        items.push(Item {
            role: Role::Background,
            shape: Shape::RoundedRect {
                x: 0,
                y: 0,
                width: s,
                height: s,
                radius: i64::from(size / PROPORTIONS.corner),
            },
            fill: PALETTE.background,
            stroke: None,
        });

        items.push(Item {
            role: Role::Plate,
            shape: Shape::Circle {
                cx: center,
                cy: center,
                r: i64::from(size / PROPORTIONS.plate),
            },
            fill: PALETTE.plate,
            stroke: Some(PALETTE.plate_border),
        });

        for food in &FOOD {
            let cx = center + frac(size, food.dx);
            let cy = center + frac(size, food.dy);
            let shape = match food.shape {
                FoodShape::Ellipse { rx, ry } => Shape::Ellipse {
                    cx,
                    cy,
                    rx: i64::from(size / rx),
                    ry: i64::from(size / ry),
                },
                FoodShape::Circle { r } => Shape::Circle {
                    cx,
                    cy,
                    r: i64::from(size / r),
                },
            };
            items.push(Item {
                role: food.role,
                shape,
                fill: food.fill,
                stroke: None,
            });
        }

        let [bx, by, bw, bh, br] = BROWN_BAR.map(|d| i64::from(size / d));
        items.push(Item {
            role: Role::Brown,
            shape: Shape::RoundedRect {
                x: center + bx,
                y: center + by,
                width: bw,
                height: bh,
                radius: br,
            },
            fill: PALETTE.brown,
            stroke: None,
        });

        Self { size, items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Composition {
        fn items_with_role(&self, role: Role) -> impl Iterator<Item = &Item> {
            self.items.iter().filter(move |i| i.role == role)
        }
    }

    #[test]
    fn test_icon_spec_rejects_bad_sizes() {
        assert!(matches!(IconSpec::new(0, "a.png"), Err(Error::InvalidSize(0))));
        assert!(IconSpec::new(100_000, "a.svg").is_ok());
        let spec = IconSpec::new(48, "a.png").unwrap();
        assert_eq!(spec.size, 48);
        assert_eq!(spec.output_path, PathBuf::from("a.png"));
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(PALETTE.background.hex(), "#2196F3");
        assert_eq!(PALETTE.plate_border.hex(), "#1976D2");
        assert_eq!(PALETTE.brown.to_rgba(), image::Rgba([0x79, 0x55, 0x48, 0xFF]));
    }

    #[test]
    fn test_outline_width_floor() {
        assert_eq!(PROPORTIONS.outline_width(64, 1), 1);
        assert_eq!(PROPORTIONS.outline_width(64, 2), 2);
        assert_eq!(PROPORTIONS.outline_width(1024, 1), 8);
    }

    #[test]
    fn test_group_counts() {
        let c = Composition::for_size(1024);
        assert_eq!(c.items.len(), 11);
        assert_eq!(c.items_with_role(Role::Background).count(), 1);
        assert_eq!(c.items_with_role(Role::Plate).count(), 1);
        assert_eq!(c.items_with_role(Role::Green).count(), 3);
        assert_eq!(c.items_with_role(Role::Red).count(), 3);
        assert_eq!(c.items_with_role(Role::Yellow).count(), 2);
        assert_eq!(c.items_with_role(Role::Brown).count(), 1);
        // Painter's order: background first, then the plate.
        assert_eq!(c.items[0].role, Role::Background);
        assert_eq!(c.items[1].role, Role::Plate);
    }

    #[test]
    fn test_coordinates_at_1024() {
        let c = Composition::for_size(1024);
        assert_eq!(
            c.items[0].shape,
            Shape::RoundedRect { x: 0, y: 0, width: 1024, height: 1024, radius: 170 }
        );
        assert_eq!(c.items[1].shape, Shape::Circle { cx: 512, cy: 512, r: 341 });
        // 512 - 1024/8, 512 - 1024/12
        assert_eq!(c.items[2].shape, Shape::Ellipse { cx: 384, cy: 427, rx: 68, ry: 51 });
        let brown = c.items_with_role(Role::Brown).next().unwrap();
        assert_eq!(
            brown.shape,
            Shape::RoundedRect { x: 563, y: 597, width: 51, height: 29, radius: 17 }
        );
    }

    #[test]
    fn test_food_stays_on_plate() {
        for size in [20, 87, 167, 1024] {
            let c = Composition::for_size(size);
            let Shape::Circle { cx, cy, r } = c.items[1].shape else {
                panic!("plate is not a circle");
            };
            for item in c.items.iter().filter(|i| i.role.is_food()) {
                let (x, y) = match item.shape {
                    Shape::Circle { cx, cy, .. } | Shape::Ellipse { cx, cy, .. } => (cx, cy),
                    Shape::RoundedRect { x, y, .. } => (x, y),
                };
                let d2 = (x - cx).pow(2) + (y - cy).pow(2);
                assert!(d2 <= r * r, "{:?} off the plate at size {}", item.role, size);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(Composition::for_size(180), Composition::for_size(180));
    }
}
