//! Address command - prints what the address algebra knows about one id.

use hexframe::{Coord, CoordSystem};

use crate::cli::AddressArgs;
use crate::output::OutputFormat;

fn join(coords: &[Coord]) -> String {
    coords
        .iter()
        .map(Coord::to_string)
        .collect::<Vec<_>>()
        .join("  ")
}

/// Run the address command
pub fn run(args: &AddressArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let coord = CoordSystem::parse_id(&args.id)?;
    let parent = CoordSystem::get_parent_coord(&coord);
    let children = CoordSystem::get_child_coords(&coord, false);
    let composed = CoordSystem::get_composed_child_coords(&coord);
    let siblings = coord.siblings();

    match format {
        OutputFormat::Human => {
            println!("Address:          {coord}");
            println!("Depth:            {}", coord.depth());
            println!("Direction:        {}", CoordSystem::get_direction(&coord));
            println!(
                "Parent:           {}",
                parent.as_ref().map(Coord::to_string).unwrap_or_else(|| "-".to_string())
            );
            println!("Children:         {}", join(&children));
            println!("Composed:         {}", join(&composed));
            println!("Siblings:         {}", join(&siblings));
            if CoordSystem::is_composed_child(&coord) {
                println!("Inside a composition");
            }
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "address": coord,
                "depth": coord.depth(),
                "direction": CoordSystem::get_direction(&coord),
                "parent": parent,
                "children": children,
                "composed_children": composed,
                "siblings": siblings,
                "is_composed_child": CoordSystem::is_composed_child(&coord),
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
