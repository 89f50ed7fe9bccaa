use crate::models::display_record::DisplayRecord;

const BAR_WIDTH: usize = 20;

fn occupancy_bar(occupancy: u8) -> String {
    let filled = (occupancy as usize * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Text rendering of one carousel slide, with the position and the
/// navigation hint when there is more than one slide.
pub fn render_slide(item: &DisplayRecord, index: usize, count: usize, navigation: bool) -> String {
    let level = item.occupancy_level();
    let mut lines = vec![
        item.name.clone(),
        format!(
            "Lotação: {:>2}% {} [{}] {}",
            item.occupancy,
            occupancy_bar(item.occupancy),
            level,
            level.color()
        ),
        item.address.clone(),
        item.image.clone(),
    ];

    if navigation {
        lines.push(format!("‹ prev   {}/{}   next ›", index + 1, count));
    } else {
        lines.push(format!("{}/{}", index + 1, count));
    }

    lines.join("\n")
}
