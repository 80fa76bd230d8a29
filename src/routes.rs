//! The patient card route table.
//!
//! The dashboard is the nested context for every list and detail page;
//! anything else lands on the not-found view.

use crate::config::schema::{MatchingConfig, RouteConfig};
use crate::routing::{RouteTable, TableError};

/// Declarative route definitions for the patient card application.
pub fn patient_card_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("/", "dashboard", "views/Dash").with_children(vec![
            RouteConfig::new("patients", "patients", "views/Patients"),
            // TODO: bind a dedicated single-patient view once one exists.
            RouteConfig::new("patients/:patientID", "single-patient", "views/Patients"),
            RouteConfig::new("medications", "medications", "views/Medications"),
            RouteConfig::new(
                "medications/:medicationID",
                "single-medication",
                "views/SingleMedication",
            ),
            RouteConfig::new("statements", "statements", "views/Statements"),
            RouteConfig::new(
                "statements/:statementID",
                "single-statement",
                "views/SingleStatement",
            ),
            RouteConfig::new("observations", "observations", "views/Observations"),
        ]),
        RouteConfig::new("*", "not-found", "views/NotFound"),
    ]
}

/// The compiled patient card table with default matching options.
pub fn patient_card_table() -> Result<RouteTable, TableError> {
    RouteTable::new(&patient_card_routes(), &MatchingConfig::default())
}
