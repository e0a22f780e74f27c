mod test {
    use color_engine::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn end_to_end_complement_palette() {
        let colors = generate_palette("#4A90E2", HarmonyType::Complement);
        let complement = hsl_to_hex(hex_to_hsl("#4A90E2").rotate(180.0));

        assert_eq!(colors.len(), 5);
        assert!(colors.iter().any(|c| c.eq_ignore_ascii_case("#4A90E2")));
        assert!(colors.contains(&complement));
    }

    #[test]
    fn end_to_end_compliance() {
        assert_eq!(wcag_compliance(4.5, false), Compliance::Aa);
        assert_eq!(wcag_compliance(3.2, true), Compliance::AaLargeText);
        assert!((contrast_ratio("#000000", "#FFFFFF") - 21.0).abs() < 1e-6);
    }

    #[test]
    fn generated_site_palette_is_accessible_after_fixing_roles() {
        let generated = generate_palette("#4a90e2", HarmonyType::Triad);
        let palette = map_to_site_palette("#4a90e2", &generated);
        assert!(palette.has_unique_roles());

        let repaired = repair_palette(&palette);
        assert!(repaired.has_unique_roles(), "{repaired:?}");

        for check in audit_palette(&repaired) {
            assert!(
                check.result.compliance.passes(),
                "{} on {}: {}",
                check.foreground,
                check.background,
                check.result.ratio
            );
        }
    }

    #[test]
    fn repaired_gray_roles_never_share_a_color() {
        for primary in (0x96..=0xfa_u8).step_by(4) {
            for text in (0x96..=0xfa_u8).step_by(4) {
                let gray = |v: u8| format!("#{v:02x}{v:02x}{v:02x}");
                let palette = SitePalette {
                    primary: gray(primary),
                    secondary: "#7b8c99".to_string(),
                    tertiary: "#123456".to_string(),
                    background: "#ffffff".to_string(),
                    text: gray(text),
                };

                let repaired = repair_palette(&palette);

                assert!(repaired.has_unique_roles(), "{palette:?} -> {repaired:?}");
                assert!(
                    audit_palette(&repaired)
                        .iter()
                        .all(|check| check.result.compliance.passes()),
                    "{palette:?} -> {repaired:?}"
                );
            }
        }
    }

    #[test]
    fn palette_json_shape_round_trips() {
        let palette = map_to_site_palette(
            "#4a90e2",
            &generate_palette("#4a90e2", HarmonyType::Analogous),
        );

        let json = serde_json::to_string(&palette).unwrap();
        let back: SitePalette = serde_json::from_str(&json).unwrap();

        assert_eq!(back, palette);
    }

    #[test]
    fn cvd_preview_of_a_whole_palette() {
        let palette = SitePalette::default();

        for variant in CvdVariant::ALL {
            let simulated = simulate_palette(&palette, variant);
            assert!(simulated.normalized().is_ok());
        }

        assert_eq!(simulate_palette(&palette, CvdVariant::Normal), palette);
    }

    #[test]
    fn strict_and_permissive_parsing_agree_on_valid_input() {
        for hex in ["#4a90e2", "#FFFFFF", "000000"] {
            assert_eq!(parse_hex(hex).unwrap(), hex_to_rgb(hex));
        }

        assert_eq!(hex_to_rgb("#xyz"), Rgb::new(0, 0, 0));
        assert!(parse_hex("#xyz").is_err());
    }
}
