/// Known platform labels and the icon asset shown next to them.
pub const PLATFORM_ICONS: [(&str, &str); 7] = [
    ("NES", "assets/platforms/nes.png"),
    ("SNES", "assets/platforms/snes.png"),
    ("Mega Drive", "assets/platforms/md.png"),
    ("GameCube", "assets/platforms/gamecube.png"),
    ("Sega Saturn", "assets/platforms/saturn.png"),
    ("PLAYSTATION", "assets/platforms/playstation.png"),
    ("Game Boy Advance", "assets/platforms/advance.png"),
];

/// Exact, case-sensitive lookup. Unknown labels have no icon.
pub fn resolve_platform_icon(platform: &str) -> Option<&'static str> {
    PLATFORM_ICONS
        .iter()
        .find(|(label, _)| *label == platform)
        .map(|(_, icon)| *icon)
}
