use crate::location::{Category, Location};

const AWS: Category = Category::provider("aws");
const GCP: Category = Category::provider("gcp");
const AZURE: Category = Category::provider("azure");
const HETZNER: Category = Category::provider("hetzner");
const OVH: Category = Category::provider("ovhcloud");
const EQUINIX: Category = Category::provider("equinix");

/// Headquarters plus the provider regions the platform runs in.
pub static DATA_CENTERS: &[Location] = &[
    Location::site("Zurich HQ", 47.3769, 8.5417, Category::Headquarters, "Headquarters", "Zurich", "CH"),
    Location::site("AWS us-east-1", 38.9940, -77.4525, AWS, "Amazon Web Services", "Ashburn", "US"),
    Location::site("AWS us-west-2", 45.8399, -119.7006, AWS, "Amazon Web Services", "Boardman", "US"),
    Location::site("AWS eu-central-1", 50.1109, 8.6821, AWS, "Amazon Web Services", "Frankfurt", "DE"),
    Location::site("AWS ap-southeast-1", 1.3521, 103.8198, AWS, "Amazon Web Services", "Singapore", "SG"),
    Location::site("AWS sa-east-1", -23.5505, -46.6333, AWS, "Amazon Web Services", "Sao Paulo", "BR"),
    Location::site("GCP europe-west4", 53.4386, 6.8355, GCP, "Google Cloud", "Eemshaven", "NL"),
    Location::site("GCP us-central1", 41.2619, -95.8608, GCP, "Google Cloud", "Council Bluffs", "US"),
    Location::site("GCP asia-northeast1", 35.6762, 139.6503, GCP, "Google Cloud", "Tokyo", "JP"),
    Location::site("Azure West Europe", 52.3676, 4.9041, AZURE, "Microsoft Azure", "Amsterdam", "NL"),
    Location::site("Azure East US", 36.6676, -78.3875, AZURE, "Microsoft Azure", "Boydton", "US"),
    Location::site("Azure Australia East", -33.8688, 151.2093, AZURE, "Microsoft Azure", "Sydney", "AU"),
    Location::site("Hetzner Falkenstein", 50.4779, 12.3713, HETZNER, "Hetzner", "Falkenstein", "DE"),
    Location::site("Hetzner Helsinki", 60.1699, 24.9384, HETZNER, "Hetzner", "Helsinki", "FI"),
    Location::site("Hetzner Ashburn", 39.0438, -77.4874, HETZNER, "Hetzner", "Ashburn", "US"),
    Location::site("OVHcloud Roubaix", 50.6942, 3.1746, OVH, "OVHcloud", "Roubaix", "FR"),
    Location::site("OVHcloud Beauharnois", 45.3151, -73.8779, OVH, "OVHcloud", "Beauharnois", "CA"),
    Location::site("Equinix LD8", 51.5115, -0.0014, EQUINIX, "Equinix", "London", "GB"),
    Location::site("Equinix SG1", 1.3213, 103.6950, EQUINIX, "Equinix", "Singapore", "SG"),
];
