use randrz::{
    CONTINUATION, LayoutError, Placement, Screen, Selection, assemble, command_line,
    format_command, parse_screens,
};

const LAPTOP_DOCKED: &str = include_str!("fixtures/laptop_docked.txt");

fn screen(name: &str, modes: &[&str]) -> Screen {
    let mut screen = Screen::new(name, true);
    screen.modes = modes
        .iter()
        .map(|line| line.parse().expect("valid mode line"))
        .collect();
    screen
}

fn positions(screens: &[Screen]) -> Vec<String> {
    assemble(screens)
        .filter_map(|placement| match placement.expect("every screen has a mode") {
            Placement::On { x, .. } => Some(format!("{}x0", x)),
            Placement::Off { .. } => None,
        })
        .collect()
}

#[test]
fn test_screens_are_placed_left_to_right() {
    let screens = [
        screen("eDP-1", &["1920x1080 60.00*+"]),
        screen("HDMI-1", &["2560x1440 59.95", "1920x1080 60.00"]),
    ];
    assert_eq!(positions(&screens), ["0x0", "1920x0"]);
}

#[test]
fn test_disconnected_screens_take_no_space() {
    let screens = [
        screen("eDP-1", &["1920x1080 60.00*+"]),
        Screen::new("DP-1", false),
        screen("HDMI-1", &["2560x1440 59.95"]),
        screen("DP-2", &["1280x1024 60.02"]),
    ];
    assert_eq!(positions(&screens), ["0x0", "1920x0", "4480x0"]);
}

#[test]
fn test_placement_groups() {
    let screens = [Screen::new("DP-1", false), screen("eDP-1", &["1920x1080 60.00*+"])];
    let groups: Vec<_> = assemble(&screens)
        .map(|placement| placement.unwrap().groups())
        .collect();

    assert_eq!(groups[0], [vec!["--output", "DP-1"], vec!["--off"]]);
    assert_eq!(
        groups[1],
        [
            vec!["--output", "eDP-1"],
            vec!["--mode", "1920x1080", "--pos", "0x0", "--rotate", "normal"],
        ]
    );
}

#[test]
fn test_connected_screen_without_mode() {
    let screens = [Screen::new("eDP-1", true)];
    let err = command_line("xrandr", &screens).unwrap_err();
    assert!(matches!(err, LayoutError::NoMode(name) if name == "eDP-1"));
}

#[test]
fn test_layout_wider_than_u32() {
    let screens = [
        screen("DP-1", &["3000000000x1 60.00"]),
        screen("DP-2", &["3000000000x1 60.00"]),
        screen("DP-3", &["10x1 60.00"]),
    ];

    let mut placements = assemble(&screens);
    assert!(matches!(
        placements.next(),
        Some(Ok(Placement::On { x: 0, .. }))
    ));
    assert!(matches!(
        placements.next(),
        Some(Err(LayoutError::OffsetOverflow(name))) if name == "DP-2"
    ));

    let err = command_line("xrandr", &screens).unwrap_err();
    assert!(matches!(err, LayoutError::OffsetOverflow(name) if name == "DP-2"));
}

#[test]
fn test_command_line_for_listing() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();

    let parsed = parse_screens(LAPTOP_DOCKED.lines()).collect::<Result<Vec<_>, _>>()?;
    let screens = Selection::new(["HDMI", "eDP"])?.arrange(parsed);
    let command = command_line("xrandr", &screens)?;

    assert_eq!(
        command,
        [
            "xrandr", "--output", "DP-1", "--off", "--output", "DP-2", "--off", "--output",
            "HDMI-1", "--mode", "2560x1440", "--pos", "0x0", "--rotate", "normal", "--output",
            "eDP-1", "--mode", "1920x1080", "--pos", "2560x0", "--rotate", "normal",
        ]
    );

    assert_eq!(
        format_command(&command),
        [
            "xrandr",
            "--output DP-1 --off",
            "--output DP-2 --off",
            "--output HDMI-1 --mode 2560x1440 --pos 0x0 --rotate normal",
            "--output eDP-1 --mode 1920x1080 --pos 2560x0 --rotate normal",
        ]
        .join(CONTINUATION)
    );
    Ok(())
}

#[test]
fn test_format_disconnected_screen() {
    let screens = [Screen::new("DP-1", false)];
    let command = command_line("xrandr", &screens).unwrap();
    assert_eq!(format_command(&command), "xrandr\\\n--output DP-1 --off");
    assert_eq!(format_command(&command[1..]), "--output DP-1 --off");
}

#[test]
fn test_format_leading_tokens() {
    assert_eq!(format_command(&["xrandr", "--auto"]), "xrandr --auto");
    assert_eq!(format_command::<&str>(&[]), "");
}
