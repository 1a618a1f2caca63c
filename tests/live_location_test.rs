#[cfg(test)]
mod live_location_tests {
    use campusmap::{constants::CAMPUS_COEFFICIENTS, prelude::*};

    fn create_test_map() -> CampusMap<RecordingSurface> {
        CampusMapBuilder::new()
            .with_image_size(1600, 1300)
            .build(RecordingSurface::new())
            .unwrap()
    }

    #[tokio::test]
    async fn test_campus_fix_lands_on_expected_pixel() {
        let mut map = create_test_map();
        let provider = FixedLocationProvider::new(GeoPoint::new(34.81000, 114.36700));

        assert_eq!(map.locate(&provider).await, ControlOutcome::Applied);

        let TransformCoefficients { a, b, c, d, e, f } = CAMPUS_COEFFICIENTS;
        let det = a * e - b * d;
        let expected = PixelPoint::new(
            (e * (114.36700 - c) - b * (34.81000 - f)) / det,
            (-d * (114.36700 - c) + a * (34.81000 - f)) / det,
        );

        let marker = map.surface().marker(MarkerId::LiveLocation).unwrap();
        assert!(marker.position().distance_to(&expected) < 1e-9);
        assert!((marker.position().x - 419.96).abs() < 0.01);
        assert!((marker.position().y - 932.47).abs() < 0.01);
        assert_eq!(map.surface().center(), Some(marker.position()));
        assert!(map.surface().notices().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_fixes_reuse_one_marker() {
        let mut map = create_test_map();
        let provider = ScriptedLocationProvider::new([
            Ok(GeoPoint::new(34.8100, 114.3670)),
            Ok(GeoPoint::new(34.8110, 114.3680)),
            Ok(GeoPoint::new(34.8120, 114.3690)),
        ]);

        for _ in 0..3 {
            map.locate(&provider).await;
        }

        assert_eq!(map.surface().marker_count(), 1);
        assert_eq!(map.live_location().marker().unwrap().updates, 2);
        assert_eq!(map.surface().pan_count(), 3);
    }

    #[tokio::test]
    async fn test_denied_permission_is_a_notice() {
        let mut map = create_test_map();
        let provider = UnavailableLocationProvider::new(LocationError::PermissionDenied);

        let outcome = map
            .dispatch(Control::LocateMe, &mut FixedAnswer(true), &provider)
            .await;

        assert_eq!(outcome, ControlOutcome::Failed);
        assert!(map.live_location().marker().is_none());
        assert_eq!(map.surface().marker_count(), 0);
        let notices = map.surface().notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert!(notices[0].message.contains("denied"));
    }

    #[tokio::test]
    async fn test_failure_after_success_keeps_marker() {
        let mut map = create_test_map();
        let provider = ScriptedLocationProvider::new([
            Ok(GeoPoint::new(34.8100, 114.3670)),
            Err(LocationError::Timeout),
        ]);

        map.locate(&provider).await;
        let before = map.surface().marker(MarkerId::LiveLocation).unwrap().position();
        map.locate(&provider).await;

        assert_eq!(
            map.surface().marker(MarkerId::LiveLocation).unwrap().position(),
            before
        );
        assert_eq!(map.surface().notices().len(), 1);
    }

    #[tokio::test]
    async fn test_off_campus_fix_is_flagged() {
        let mut map = create_test_map();
        let provider = FixedLocationProvider::new(GeoPoint::new(34.90, 114.30));

        assert_eq!(map.locate(&provider).await, ControlOutcome::Applied);
        let notices = map.surface().notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Info);
    }

    #[tokio::test]
    async fn test_refit_moves_live_marker() {
        let mut map = create_test_map();
        map.locate(&FixedLocationProvider::new(GeoPoint::new(34.81, 114.367)))
            .await;
        let before = map.surface().marker(MarkerId::LiveLocation).unwrap().position();

        map.refit(&campusmap::constants::CAMPUS_CORRESPONDENCES).unwrap();
        let after = map.surface().marker(MarkerId::LiveLocation).unwrap().position();

        assert_ne!(before, after);
        assert!(before.distance_to(&after) < 1.0);
    }
}
