use std::collections::BTreeMap;

use crate::{CategoryInfo, WasteCategory};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn entry(
    name: &str,
    subcategories: &[&str],
    disposal_instructions: &str,
    recycling_code: &str,
    contamination_warnings: &[&str],
    eco_tips: &[&str],
) -> CategoryInfo {
    CategoryInfo {
        name: name.to_string(),
        subcategories: strings(subcategories),
        disposal_instructions: disposal_instructions.to_string(),
        recycling_code: recycling_code.to_string(),
        contamination_warnings: strings(contamination_warnings),
        eco_tips: strings(eco_tips),
    }
}

/// Default catalog shipped with the library
pub(crate) fn builtin_entries() -> BTreeMap<WasteCategory, CategoryInfo> {
    let mut entries = BTreeMap::new();

    entries.insert(
        WasteCategory::RecyclablePaper,
        entry(
            "Recyclable Paper & Cardboard",
            &["Cardboard boxes", "Newspaper", "Office paper", "Magazines", "Paper bags"],
            "Flatten boxes, keep paper dry and place it in the paper recycling bin",
            "PAP 20-22",
            &[
                "Greasy pizza boxes belong in compost or general waste",
                "Wax-coated or plastic-laminated paper is not recyclable",
                "Wet paper fibres are too weak to recycle",
            ],
            &[
                "Flatten cardboard to save space in the bin",
                "Remove plastic windows from envelopes",
                "Shredded paper is best kept in a paper bag",
                "Print double-sided to halve paper use",
            ],
        ),
    );

    entries.insert(
        WasteCategory::RecyclablePlastic,
        entry(
            "Recyclable Plastic",
            &["PET bottles", "HDPE containers", "Food tubs", "Detergent bottles"],
            "Empty and rinse, replace caps, then place in the plastics recycling bin",
            "PET 1 / HDPE 2 / PP 5",
            &[
                "Soft films and bags jam sorting machines",
                "Food residue contaminates whole batches",
                "Black plastic is often invisible to optical sorters",
            ],
            &[
                "Check the resin code on the bottom of the container",
                "Squash bottles to save space",
                "Choose refillable containers where possible",
                "Return soft plastics to supermarket collection points",
            ],
        ),
    );

    entries.insert(
        WasteCategory::RecyclableGlass,
        entry(
            "Recyclable Glass",
            &["Bottles", "Jars"],
            "Rinse, remove lids and place in the glass bank sorted by colour",
            "GL 70-72",
            &[
                "Window glass and mirrors melt at a different temperature",
                "Ceramics and drinking glasses are not container glass",
                "Broken glass should be wrapped before disposal",
            ],
            &[
                "Glass can be recycled endlessly without losing quality",
                "Reuse jars for storage before recycling them",
                "Separate clear, green and brown glass if your area asks for it",
            ],
        ),
    );

    entries.insert(
        WasteCategory::RecyclableMetal,
        entry(
            "Recyclable Metal",
            &["Aluminium cans", "Steel tins", "Clean foil", "Aerosol cans (empty)"],
            "Rinse cans and tins and place them in the metal recycling bin",
            "ALU 41 / FE 40",
            &[
                "Aerosols must be fully empty",
                "Paint tins with residue count as hazardous waste",
                "Foil with food residue should be cleaned first",
            ],
            &[
                "Recycling aluminium saves about 95% of the energy of new metal",
                "Scrunch clean foil into a ball so it is sorted correctly",
                "Leave labels on, they burn off during smelting",
            ],
        ),
    );

    entries.insert(
        WasteCategory::OrganicFood,
        entry(
            "Food Waste",
            &["Fruit and vegetable scraps", "Leftovers", "Coffee grounds", "Eggshells"],
            "Place in the food waste caddy or a home compost bin",
            "ORG-F",
            &[
                "Compostable plastics may not break down in home compost",
                "Remove stickers from fruit peel",
                "No packaging in the food caddy",
            ],
            &[
                "Plan meals to reduce food waste",
                "Freeze leftovers before they spoil",
                "Coffee grounds make a good compost ingredient",
            ],
        ),
    );

    entries.insert(
        WasteCategory::OrganicYard,
        entry(
            "Garden Waste",
            &["Grass cuttings", "Leaves", "Hedge trimmings", "Small branches"],
            "Place in the green garden waste bin or compost at home",
            "ORG-Y",
            &[
                "Soil and stones are not accepted",
                "Invasive weeds should go to general waste",
                "Treated wood is not garden waste",
            ],
            &[
                "Leave grass cuttings on the lawn as mulch",
                "Shred branches to speed up composting",
                "Leaf mould makes excellent soil conditioner",
            ],
        ),
    );

    entries.insert(
        WasteCategory::Hazardous,
        entry(
            "Hazardous Waste",
            &["Batteries", "Paint", "Chemicals", "Pesticides", "Fluorescent tubes"],
            "Take to a household hazardous waste collection point, never put in household bins",
            "HAZ",
            &[
                "Never mix chemicals",
                "Tape battery terminals before disposal",
                "Keep products in their original containers",
            ],
            &[
                "Choose rechargeable batteries",
                "Buy only as much paint as you need",
                "Ask your council about free hazardous waste days",
            ],
        ),
    );

    entries.insert(
        WasteCategory::EWaste,
        entry(
            "Electronic Waste",
            &["Phones", "Computers", "Cables", "Small appliances", "Chargers"],
            "Take to an e-waste drop-off or retailer take-back scheme",
            "WEEE",
            &[
                "Remove batteries where possible",
                "Wipe personal data from devices",
                "Damaged lithium batteries are a fire risk",
            ],
            &[
                "Repair or donate working devices",
                "Many retailers take old electronics back for free",
                "Precious metals in phones can be recovered",
            ],
        ),
    );

    entries.insert(
        WasteCategory::LandfillGeneral,
        entry(
            "General Waste",
            &["Mixed materials", "Soiled packaging", "Crisp packets", "Nappies"],
            "Place in the general waste bin",
            "N/A",
            &[
                "Check whether any part of the item can be separated and recycled",
                "Hazardous items must never go to landfill",
            ],
            &[
                "Look for reusable alternatives next time",
                "Separate mixed-material packaging where possible",
                "Buy products with less packaging",
            ],
        ),
    );

    entries
}
