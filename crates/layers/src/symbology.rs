use catalog::{Catalog, Category};

/// How one category of location is drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointStyle {
    pub color: [f32; 4],
    /// Lift as a fraction of the globe radius.
    pub altitude: f32,
    /// Multiplier on the point layer's base radius.
    pub radius_scale: f32,
}

impl PointStyle {
    pub const fn new(color: [f32; 4], altitude: f32, radius_scale: f32) -> Self {
        Self {
            color,
            altitude,
            radius_scale,
        }
    }

    /// CSS `rgba(...)` form of the color.
    pub fn css(&self) -> String {
        css_rgba(self.color)
    }
}

pub fn css_rgba(color: [f32; 4]) -> String {
    let [r, g, b, a] = color.map(|c| c.clamp(0.0, 1.0));
    format!(
        "rgba({}, {}, {}, {:.3})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

pub const HEADQUARTERS_STYLE: PointStyle = PointStyle::new([1.0, 0.42, 0.21, 1.0], 0.06, 2.0);
pub const DEFAULT_STYLE: PointStyle = PointStyle::new([0.75, 0.78, 0.82, 0.9], 0.01, 1.0);

const AWS: PointStyle = PointStyle::new([1.0, 0.60, 0.0, 1.0], 0.01, 1.0);
const GCP: PointStyle = PointStyle::new([0.26, 0.52, 0.96, 1.0], 0.01, 1.0);
const AZURE: PointStyle = PointStyle::new([0.0, 0.75, 0.95, 1.0], 0.01, 1.0);
const HETZNER: PointStyle = PointStyle::new([0.84, 0.05, 0.20, 1.0], 0.01, 1.0);
const OVHCLOUD: PointStyle = PointStyle::new([0.48, 0.35, 0.90, 1.0], 0.01, 1.0);
const EQUINIX: PointStyle = PointStyle::new([0.20, 0.80, 0.45, 1.0], 0.01, 1.0);

/// Category → style. Pure; unknown providers get [`DEFAULT_STYLE`].
pub fn style_for(category: &Category) -> PointStyle {
    match category {
        Category::Headquarters => HEADQUARTERS_STYLE,
        Category::Provider(id) => match id.as_ref() {
            "aws" => AWS,
            "gcp" => GCP,
            "azure" => AZURE,
            "hetzner" => HETZNER,
            "ovhcloud" => OVHCLOUD,
            "equinix" => EQUINIX,
            _ => DEFAULT_STYLE,
        },
    }
}

/// One entry per category present in the catalog, headquarters first.
pub fn legend(catalog: &Catalog) -> Vec<(Category, PointStyle)> {
    let mut out = Vec::new();
    if catalog.headquarters().next().is_some() {
        out.push((Category::Headquarters, HEADQUARTERS_STYLE));
    }
    for id in catalog.providers() {
        let category = Category::from(id.to_string());
        let style = style_for(&category);
        out.push((category, style));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_STYLE, HEADQUARTERS_STYLE, css_rgba, legend, style_for};
    use catalog::{Catalog, Category};

    #[test]
    fn headquarters_is_accented_and_larger() {
        let hq = style_for(&Category::Headquarters);
        let aws = style_for(&Category::provider("aws"));
        assert_eq!(hq, HEADQUARTERS_STYLE);
        assert!(hq.radius_scale > aws.radius_scale);
        assert!(hq.altitude > aws.altitude);
    }

    #[test]
    fn known_providers_have_distinct_hues() {
        let catalog = Catalog::builtin();
        let colors: Vec<[f32; 4]> = catalog
            .providers()
            .into_iter()
            .map(|id| style_for(&Category::from(id.to_string())).color)
            .collect();
        for (i, a) in colors.iter().enumerate() {
            assert_ne!(*a, DEFAULT_STYLE.color);
            assert_ne!(*a, HEADQUARTERS_STYLE.color);
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_provider_falls_back() {
        assert_eq!(style_for(&Category::provider("future-cloud")), DEFAULT_STYLE);
    }

    #[test]
    fn mapping_is_deterministic() {
        let c = Category::provider("gcp");
        assert_eq!(style_for(&c), style_for(&c.clone()));
    }

    #[test]
    fn css_formats_bytes() {
        assert_eq!(css_rgba([1.0, 0.0, 0.5, 1.0]), "rgba(255, 0, 128, 1.000)");
        assert_eq!(css_rgba([2.0, -1.0, 0.0, 0.5]), "rgba(255, 0, 0, 0.500)");
    }

    #[test]
    fn legend_lists_headquarters_first() {
        let entries = legend(&Catalog::builtin());
        assert_eq!(entries[0].0, Category::Headquarters);
        assert_eq!(entries.len(), 7);
    }
}
