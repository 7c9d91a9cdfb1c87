use regex::Regex;
use std::sync::LazyLock;

static NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)-|bubt").unwrap());
static LABEL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i).*(room|building)").unwrap());
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").unwrap());
static ROOM_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{3}").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomBuilding {
    pub room: String,
    pub building: String,
}

/// Splits text like `"Room: 402, Building: MSM"` into room and building.
///
/// The first token with three consecutive digits is the room, the first
/// other token is the building, so a building name with a three-digit
/// number in it is never reported as a building.
pub fn parse_room_and_building(text: &str) -> RoomBuilding {
    let cleaned = NOISE.replace_all(text, "");
    let mut segments = cleaned.split(',');
    let room_text = segments.next().unwrap_or_default();
    let building_text = segments.next().unwrap_or_default();

    let tokens: Vec<String> = extract_parts(room_text)
        .into_iter()
        .chain(extract_parts(building_text))
        .flat_map(|part| {
            part.split(',')
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    let mut result = RoomBuilding::default();
    let room = tokens.iter().find(|token| ROOM_NUMBER.is_match(token));
    let building = tokens.iter().find(|token| !ROOM_NUMBER.is_match(token));

    if let Some(room) = room {
        result.room = room.clone();
    }
    if let Some(building) = building {
        result.building = building
            .strip_prefix(|c: char| c == 'b' || c == 'B')
            .unwrap_or(building)
            .to_string();
    }

    result
}

fn extract_parts(segment: &str) -> Vec<String> {
    LABEL_PREFIX
        .replace_all(segment, "")
        .split(':')
        .map(|part| NON_WORD.replace_all(part.trim(), ",").into_owned())
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(room: &str, building: &str) -> RoomBuilding {
        RoomBuilding {
            room: room.to_string(),
            building: building.to_string(),
        }
    }

    #[test]
    fn parses_labelled_room_and_building() {
        assert_eq!(parse_room_and_building("Room: 402, Building: MSM"), parsed("402", "MSM"));
    }

    #[test]
    fn ignores_institution_name_and_hyphens() {
        assert_eq!(
            parse_room_and_building("Room-708, BUBT Building-MTA"),
            parsed("708", "MTA")
        );
    }

    #[test]
    fn strips_leading_b_from_building() {
        assert_eq!(parse_room_and_building("Room: 301, B2"), parsed("301", "2"));
    }

    #[test]
    fn slashes_split_tokens() {
        assert_eq!(parse_room_and_building("Room: 615/MSM"), parsed("615", "MSM"));
    }

    #[test]
    fn missing_parts_stay_empty() {
        assert_eq!(parse_room_and_building(""), RoomBuilding::default());
        assert_eq!(parse_room_and_building("Room: 402"), parsed("402", ""));
    }

    #[test]
    fn three_digit_building_names_are_not_buildings() {
        assert_eq!(parse_room_and_building("Room 210, Building 2"), parsed("210", "2"));
        assert_eq!(parse_room_and_building("Room 210, Building 200"), parsed("210", ""));
    }
}
