//! Snapshot of the fixed taxonomy listing.

use shelter_transform::taxonomy_listing;

fn render_listing() -> String {
    taxonomy_listing()
        .iter()
        .map(|summary| {
            let kind = serde_json::to_value(summary.match_kind).unwrap();
            format!(
                "{} [{}]: {}",
                summary.name,
                kind.as_str().unwrap_or_default(),
                summary.labels.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn taxonomy_listing_snapshot() {
    insta::assert_snapshot!(render_listing(), @r"
    intake_condition [exact]: medical, behavior, routine, unknown
    outcome_type [exact]: unknown, alive, admin, deceased
    outcome_subtype [exact]: location, behavior, program, admin, unknown
    other_species_breed [exact]: rabbit, rodent_small_pet, reptile_amphibian, arthropod_aquatic, wildlife, unknown
    akc_group [exact]: toy, hound, terrier, working, foundation, sporting, herding, non_sporting, unknown
    cat_breed_group [contains]: dsh, dmh, dlh
    hair_length [word]: short, medium, long, unknown
    color_pattern [contains]: patterned
    ");
}

#[test]
fn listing_serializes_for_reports() {
    let json = serde_json::to_value(taxonomy_listing()).unwrap();
    let first = &json[0];
    assert_eq!(first["name"], "intake_condition");
    assert_eq!(first["match_kind"], "exact");
    assert_eq!(first["term_count"], 9);
}
