use crate::helpers::{ScriptedLookup, fill_valid_basics, spawn_session};
use onboarding::{
    application::onboarding_session::{GeoIssue, GeoSource, SessionError},
    domain::{
        geo::{GeoError, Region},
        vendor::{FieldName, TransportMode},
    },
};
use std::{sync::Arc, time::Duration};

fn bengaluru_lookup() -> Arc<ScriptedLookup> {
    Arc::new(ScriptedLookup::new().answer("560001", 100, Region::Karnataka, "Bengaluru"))
}

#[tokio::test(start_paused = true)]
async fn complete_form_submits_looked_up_address() {
    let mut session = spawn_session(bengaluru_lookup());
    fill_valid_basics(&mut session);
    session.geo().set_pincode("560001").unwrap();
    session.geo().settled().await;

    let submission = session.submit().expect("complete form should submit");

    assert_eq!(submission.session_id, session.id());
    assert_eq!(submission.basics.vendor_code, "ACM001");
    assert_eq!(submission.basics.gstin, "29ABCDE1234F1Z5");
    assert_eq!(submission.basics.primary_contact_phone, "9845012345");
    assert_eq!(submission.pincode, "560001");
    assert_eq!(submission.state, Region::Karnataka);
    assert_eq!(submission.city, "Bengaluru");
    assert_eq!(submission.geo_source, GeoSource::Lookup);
    assert_eq!(submission.transport_mode, TransportMode::Road);
    assert!(submission.submitted_at >= session.started_at());

    assert!(session.geo().is_closed());
    assert_eq!(session.submit(), Err(SessionError::Closed));
}

#[tokio::test(start_paused = true)]
async fn empty_form_reports_every_problem() {
    let mut session = spawn_session(bengaluru_lookup());

    let (fields, geo) = match session.submit() {
        Err(SessionError::Incomplete { fields, geo }) => (fields, geo),
        other => panic!("expected an incomplete submission, got {other:?}"),
    };
    assert_eq!(fields.len(), FieldName::ALL.len() - 1);
    assert!(!fields.contains(&FieldName::CompanyRating));
    assert_eq!(geo, Some(GeoIssue::IncompletePincode));

    // Still open, with errors visible to the form.
    assert!(!session.geo().is_closed());
    assert_eq!(
        session.vendor().error(FieldName::VendorCode),
        Some("Vendor code is required")
    );
}

#[tokio::test(start_paused = true)]
async fn submit_waits_for_pending_lookup() {
    let mut session = spawn_session(bengaluru_lookup());
    fill_valid_basics(&mut session);
    session.geo().set_pincode("560001").unwrap();

    assert_eq!(
        session.submit(),
        Err(SessionError::Incomplete {
            fields: Vec::new(),
            geo: Some(GeoIssue::Pending),
        })
    );

    session.geo().settled().await;
    assert!(session.submit().is_ok());
}

#[tokio::test(start_paused = true)]
async fn manual_address_after_failed_lookup_is_submitted() {
    let mut session = spawn_session(bengaluru_lookup());
    fill_valid_basics(&mut session);

    session.geo().set_pincode("635109").unwrap();
    let view = session.geo().settled().await;
    assert!(view.editable);

    let submit_without_city = session.submit();
    assert_eq!(
        submit_without_city,
        Err(SessionError::Incomplete {
            fields: Vec::new(),
            geo: Some(GeoIssue::MissingState),
        })
    );

    session.geo().set_state(Region::TamilNadu).unwrap();
    session.geo().set_city("  Hosur ").unwrap();

    let submission = session.submit().unwrap();
    assert_eq!(submission.state, Region::TamilNadu);
    assert_eq!(submission.city, "Hosur");
    assert_eq!(submission.geo_source, GeoSource::Manual);
}

#[tokio::test(start_paused = true)]
async fn invalid_field_blocks_submit_until_fixed() {
    let mut session = spawn_session(bengaluru_lookup());
    fill_valid_basics(&mut session);
    session
        .vendor_mut()
        .input(FieldName::VendorEmailAddress, "ops-at-acme")
        .unwrap();
    session.geo().set_pincode("560001").unwrap();
    session.geo().settled().await;

    assert_eq!(
        session.submit(),
        Err(SessionError::Incomplete {
            fields: vec![FieldName::VendorEmailAddress],
            geo: None,
        })
    );

    session
        .vendor_mut()
        .input(FieldName::VendorEmailAddress, "ops@acme.example")
        .unwrap();
    assert!(session.submit().is_ok());
}

#[tokio::test(start_paused = true)]
async fn abandoning_cancels_the_pending_lookup() {
    let session = spawn_session(bengaluru_lookup());
    session.geo().set_pincode("560001").unwrap();
    let updates = session.geo().subscribe();

    session.abandon();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let geo = updates.borrow().clone();
    assert_eq!(geo.state, None);
    assert!(!geo.is_loading);
}

#[tokio::test(start_paused = true)]
async fn geo_edits_follow_the_lock() {
    let mut session = spawn_session(bengaluru_lookup());
    session.geo().set_pincode("560001").unwrap();
    session.geo().settled().await;

    assert_eq!(session.geo().set_city("Mysuru"), Err(GeoError::Locked));
    assert!(session.set_transport_mode(TransportMode::Ship).is_err());
    assert_eq!(session.transport_mode(), TransportMode::Road);
}
