//! The built-in solar system and RON catalog persistence.

use std::f64::consts::PI;
use std::path::Path;

use crate::{
    Atmosphere, BandPalette, BodyCategory, BodyDescriptor, BodyError, RingDescriptor, Rgb,
    SurfaceKind,
};

/// Parse a catalog whose root is the central star.
pub fn from_ron(source: &str) -> Result<BodyDescriptor, BodyError> {
    ron::from_str(source).map_err(BodyError::Catalog)
}

/// Serialize a catalog as pretty RON.
pub fn to_ron(root: &BodyDescriptor) -> Result<String, BodyError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(6)
        .separate_tuple_members(true)
        .enumerate_arrays(false);
    ron::ser::to_string_pretty(root, pretty).map_err(BodyError::Serialize)
}

/// Load a catalog file from disk.
pub fn load(path: &Path) -> Result<BodyDescriptor, BodyError> {
    let source = std::fs::read_to_string(path).map_err(BodyError::Read)?;
    let root = from_ron(&source)?;
    log::info!("Loaded body catalog from {}", path.display());
    Ok(root)
}

fn hex(s: &str) -> Rgb {
    // Only called on the literals below.
    Rgb::from_hex(s).unwrap_or(Rgb::WHITE)
}

fn moon(name: &str, display: &str, radius: f64, distance: f64, speed: f64, color: &str) -> BodyDescriptor {
    BodyDescriptor::new(name, BodyCategory::Moon, radius, distance, speed, hex(color))
        .with_display_name(display)
}

fn planet(name: &str, display: &str, radius: f64, distance: f64, speed: f64, color: &str) -> BodyDescriptor {
    BodyDescriptor::new(name, BodyCategory::Planet, radius, distance, speed, hex(color))
        .with_display_name(display)
}

fn atmosphere(color: &str, scale: f64, coefficient: f64, power: f64) -> Atmosphere {
    Atmosphere {
        color: hex(color),
        scale,
        coefficient,
        power,
    }
}

/// The Sun, eight planets, Pluto and their major moons at visualization scale.
///
/// Distances and radii are chosen for legibility, not proportion. Triton
/// orbits retrograde.
pub fn solar_system() -> BodyDescriptor {
    let mercury = planet("Mercury", "Меркурий", 1.5, 20.0, 4.1, "#B5A7A7")
        .with_real_radius(2_439.7)
        .with_description("Smallest planet, closest to the Sun.");

    let venus = planet("Venus", "Венера", 3.8, 30.0, 1.6, "#E6DBD1")
        .with_real_radius(6_051.8)
        .with_atmosphere(atmosphere("#e3bb76", 1.18, 0.3, 1.8))
        .with_description("Dense carbon dioxide atmosphere.");

    let earth = planet("Earth", "Земля", 4.0, 45.0, 1.0, "#2D3B6E")
        .with_real_radius(6_371.0)
        .with_surface(SurfaceKind::Oceanic)
        .with_clouds()
        .with_atmosphere(atmosphere("#4dabff", 1.12, 0.1, 3.5))
        .with_satellite(moon("Moon", "Луна", 1.0, 8.0, 2.0, "#D1D5DB").with_real_radius(1_737.4))
        .with_description("The only known world with life.");

    let mars = planet("Mars", "Марс", 2.1, 60.0, 0.53, "#C1440E")
        .with_real_radius(3_389.5)
        .with_surface(SurfaceKind::Arid)
        .with_atmosphere(atmosphere("#ff7b4d", 1.06, 0.05, 6.0))
        .with_satellite(moon("Phobos", "Фобос", 0.4, 3.5, 3.0, "#78716c"))
        .with_satellite(moon("Deimos", "Деймос", 0.3, 5.0, 2.0, "#a8a29e"));

    let jupiter = planet("Jupiter", "Юпитер", 9.0, 90.0, 0.08, "#BCAFB2")
        .with_real_radius(69_911.0)
        .with_surface(SurfaceKind::Banded {
            bands: 12,
            palette: BandPalette::Ochre,
            storm: true,
        })
        .with_satellite(moon("Io", "Ио", 0.8, 13.0, 2.5, "#fcd34d").with_real_radius(1_821.6))
        .with_satellite(moon("Europa", "Европа", 0.7, 15.0, 2.0, "#bfdbfe").with_real_radius(1_560.8))
        .with_satellite(moon("Ganymede", "Ганимед", 1.2, 18.0, 1.5, "#9ca3af").with_real_radius(2_634.1))
        .with_satellite(moon("Callisto", "Каллисто", 1.1, 22.0, 1.0, "#6b7280").with_real_radius(2_410.3));

    let saturn = planet("Saturn", "Сатурн", 8.0, 130.0, 0.03, "#EAD6B8")
        .with_real_radius(58_232.0)
        .with_surface(SurfaceKind::Banded {
            bands: 6,
            palette: BandPalette::Pale,
            storm: false,
        })
        .with_ring(RingDescriptor {
            inner_radius: 10.0,
            outer_radius: 18.0,
            color: None,
            tilt: [-PI / 2.5, 0.0, 0.0],
            has_gaps: true,
        })
        .with_satellite(moon("Titan", "Титан", 1.5, 24.0, 1.2, "#fbbf24").with_real_radius(2_574.7));

    let uranus = planet("Uranus", "Уран", 6.0, 170.0, 0.01, "#D1F3F5")
        .with_real_radius(25_362.0)
        .with_ring(RingDescriptor {
            inner_radius: 7.0,
            outer_radius: 10.0,
            color: Some(Rgb::WHITE),
            tilt: [0.0, 0.0, PI / 2.0],
            has_gaps: false,
        })
        .with_satellite(moon("Titania", "Титания", 0.7, 12.0, 2.0, "#e5e7eb"));

    let neptune = planet("Neptune", "Нептун", 5.8, 210.0, 0.006, "#5B5DDF")
        .with_real_radius(24_622.0)
        .with_atmosphere(atmosphere("#4169E1", 1.15, 0.1, 4.0))
        .with_satellite(
            moon("Triton", "Тритон", 0.9, 10.0, -1.5, "#fca5a5")
                .with_description("Large moon on a retrograde orbit."),
        );

    let pluto = BodyDescriptor::new("Pluto", BodyCategory::Dwarf, 1.2, 250.0, 0.004, hex("#968570"))
        .with_display_name("Плутон")
        .with_real_radius(1_188.3)
        .with_satellite(moon("Charon", "Харон", 0.6, 3.0, 1.0, "#9ca3af"));

    BodyDescriptor::new("Sun", BodyCategory::Star, 12.0, 0.0, 0.0, hex("#FDB813"))
        .with_display_name("Солнце")
        .with_real_radius(696_340.0)
        .with_description("Central star, mostly hydrogen and helium.")
        .with_satellite(mercury)
        .with_satellite(venus)
        .with_satellite(earth)
        .with_satellite(mars)
        .with_satellite(jupiter)
        .with_satellite(saturn)
        .with_satellite(uranus)
        .with_satellite(neptune)
        .with_satellite(pluto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BodyTree;

    #[test]
    fn test_solar_system_builds() {
        let tree = BodyTree::build(solar_system()).unwrap();
        assert_eq!(tree.len(), 22);
        assert_eq!(tree.children(tree.root()).len(), 9);
        assert_eq!(tree.descriptor(tree.root()).unwrap().category, BodyCategory::Star);
    }

    #[test]
    fn test_triton_is_retrograde() {
        let tree = BodyTree::build(solar_system()).unwrap();
        let triton = tree.id_of("Triton").unwrap();
        assert!(tree.descriptor(triton).unwrap().speed < 0.0);
        assert_eq!(tree.parent(triton), tree.id_of("Neptune"));
    }

    #[test]
    fn test_real_attributes_are_optional() {
        let tree = BodyTree::build(solar_system()).unwrap();
        let earth = tree.descriptor(tree.id_of("Earth").unwrap()).unwrap();
        let phobos = tree.descriptor(tree.id_of("Phobos").unwrap()).unwrap();
        assert!(earth.real_radius_km.is_some());
        assert!(phobos.real_radius_km.is_none());
    }

    #[test]
    fn test_catalog_ron_roundtrip() {
        let original = solar_system();
        let text = to_ron(&original).unwrap();
        let parsed = from_ron(&text).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_invalid_catalog_reports_parse_error() {
        assert!(matches!(
            from_ron("(name: \"Sun\", category: Comet)"),
            Err(BodyError::Catalog(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.ron");
        std::fs::write(&path, to_ron(&solar_system()).unwrap()).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.name, "Sun");
        assert!(matches!(
            load(&dir.path().join("missing.ron")),
            Err(BodyError::Read(_))
        ));
    }
}
