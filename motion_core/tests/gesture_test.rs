use motion_core::gesture::body::{NOSE, RIGHT_SHOULDER};
use motion_core::gesture::hand::{index_tip, palm_center};
use motion_core::gesture::{
    is_fingers_spread, is_hand_closed, is_hand_open, joint_angle, matches_pose, pose_by_id,
    thumb_to_finger_touching, POSES,
};
use motion_core::synth;
use motion_schema::Landmark;

#[test]
fn test_hand_classifiers_are_total_on_short_input() {
    for len in 0..21 {
        let landmarks = vec![Landmark::new(0.5, 0.5); len];
        assert!(!is_hand_closed(&landmarks), "len {len}");
        assert!(!is_hand_open(&landmarks), "len {len}");
        assert!(!is_fingers_spread(&landmarks), "len {len}");
        assert_eq!(thumb_to_finger_touching(&landmarks), None, "len {len}");
        assert_eq!(palm_center(&landmarks), None, "len {len}");
        assert_eq!(index_tip(&landmarks), None, "len {len}");
    }
}

#[test]
fn test_pose_predicates_are_total_on_short_input() {
    for len in 0..33 {
        let landmarks = vec![Landmark::new(0.5, 0.5); len];
        for pose in POSES.iter() {
            assert!(!(pose.check)(&landmarks), "{} len {len}", pose.id);
        }
    }
}

#[test]
fn test_closed_and_open_hands() {
    let fist = synth::closed_hand(0.5, 0.5);
    assert!(is_hand_closed(&fist));
    assert!(!is_hand_open(&fist));
    assert_eq!(thumb_to_finger_touching(&fist), None);

    let open = synth::open_hand(0.5, 0.5);
    assert!(is_hand_open(&open));
    assert!(!is_hand_closed(&open));
    assert!(!is_fingers_spread(&open));
    assert_eq!(thumb_to_finger_touching(&open), None);
}

#[test]
fn test_three_curled_fingers_are_enough() {
    let mut hand = synth::closed_hand(0.5, 0.5);
    // straighten the pinky only
    hand[18] = Landmark::new(0.53, 0.46);
    hand[19] = Landmark::new(0.53, 0.44);
    hand[20] = Landmark::new(0.53, 0.42);
    assert!(is_hand_closed(&hand));
}

#[test]
fn test_spread_hand() {
    let hand = synth::spread_hand(0.5, 0.5);
    assert!(is_fingers_spread(&hand));
    assert!(is_hand_open(&hand));
}

#[test]
fn test_thumb_touch_reports_finger() {
    for finger in 1..=4u8 {
        let hand = synth::pinch_hand(0.5, 0.5, finger);
        assert_eq!(thumb_to_finger_touching(&hand), Some(finger));
    }
}

#[test]
fn test_pointing_and_palm_helpers_land_where_asked() {
    let tip = index_tip(&synth::pointing_at(0.3, 0.7)).unwrap();
    assert!((tip.x - 0.3).abs() < 1e-5);
    assert!((tip.y - 0.7).abs() < 1e-5);

    let palm = palm_center(&synth::palm_at(0.2, 0.4, true)).unwrap();
    assert!((palm.x - 0.2).abs() < 1e-5);
    assert!((palm.y - 0.4).abs() < 1e-5);
}

#[test]
fn test_neutral_body_matches_no_pose() {
    let body = synth::neutral_body();
    for pose in POSES.iter() {
        assert!(!(pose.check)(&body), "{} should not match", pose.id);
    }
}

#[test]
fn test_every_pose_has_a_matching_body() {
    for pose in POSES.iter() {
        let body = synth::pose_body(pose.id).expect("known pose");
        assert!(matches_pose(pose.id, &body), "{} should match", pose.id);
    }
}

#[test]
fn test_one_arm_poses_are_exclusive() {
    let left = synth::pose_body("left_arm_up").unwrap();
    assert!(!matches_pose("right_arm_up", &left));
    assert!(!matches_pose("arms_up", &left));

    let leaning = synth::pose_body("lean_left").unwrap();
    assert!(!matches_pose("lean_right", &leaning));
}

#[test]
fn test_hands_on_head_needs_wrists_near_nose() {
    let mut body = synth::pose_body("hands_on_head").unwrap();
    assert!(matches_pose("hands_on_head", &body));
    body[NOSE] = Landmark::new(0.5, 0.0);
    assert!(!matches_pose("hands_on_head", &body));
}

#[test]
fn test_unknown_pose_never_matches() {
    let body = synth::pose_body("arms_up").unwrap();
    assert!(pose_by_id("cartwheel").is_none());
    assert!(!matches_pose("cartwheel", &body));
    assert!(synth::pose_body("cartwheel").is_none());
}

#[test]
fn test_easy_poses_are_the_simple_three() {
    let simple: Vec<&str> = POSES.iter().filter(|p| p.simple).map(|p| p.id).collect();
    assert_eq!(simple, vec!["arms_up", "t_pose", "hands_on_head"]);
}

#[test]
fn test_joint_angle() {
    let a = Landmark::new(0.0, 1.0);
    let b = Landmark::new(0.0, 0.0);
    let c = Landmark::new(1.0, 0.0);
    let deg = joint_angle(&a, &b, &c).unwrap();
    assert!((deg - 90.0).abs() < 1e-3);

    let straight = joint_angle(&Landmark::new(-1.0, 0.0), &b, &c).unwrap();
    assert!((straight - 180.0).abs() < 1e-3);

    assert_eq!(joint_angle(&b, &b, &c), None);
}

#[test]
fn test_t_pose_rejects_bent_elbows() {
    let mut body = synth::pose_body("t_pose").unwrap();
    assert!(matches_pose("t_pose", &body));
    // drop the right elbow well below the shoulder line
    body[14] = Landmark::new(0.25, body[RIGHT_SHOULDER].y + 0.2);
    assert!(!matches_pose("t_pose", &body));
}
