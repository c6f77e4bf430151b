//! Field registries, CSV column orders and embedded sample fixtures for the
//! six served collections. Declared once here; everything else in the engine
//! is collection-agnostic.

use openfund_core::{CollectionId, FieldKind, FieldRegistry};
use openfund_engine::CsvColumn;

use crate::source::FixtureSource;

pub fn registry_for(id: CollectionId) -> FieldRegistry {
    match id {
        CollectionId::Grants => grants_registry(),
        CollectionId::Challenges => challenges_registry(),
        CollectionId::SbirAwards => sbir_awards_registry(),
        CollectionId::SbirCompanies => sbir_companies_registry(),
        CollectionId::SbirSolicitations => sbir_solicitations_registry(),
        CollectionId::Nofas => nofas_registry(),
    }
}

pub fn grants_registry() -> FieldRegistry {
    let mut r = FieldRegistry::new("id");
    r.register("id", FieldKind::Text)
        .register("title", FieldKind::Text)
        .register("source", FieldKind::Text)
        .register("agency", FieldKind::Text)
        .register("agency_code", FieldKind::Text)
        .register("opportunity_number", FieldKind::Text)
        .register("category", FieldKind::Enum)
        .register("status", FieldKind::Enum)
        .register("funding_instrument", FieldKind::Enum)
        .register("cost_sharing", FieldKind::Boolean)
        .register("award_floor", FieldKind::Number)
        .register("award_ceiling", FieldKind::Number)
        .register("total_funding", FieldKind::Number)
        .register("expected_awards", FieldKind::Number)
        .register("posted_date", FieldKind::Date)
        .register("close_date", FieldKind::Date)
        .register("last_updated", FieldKind::Date)
        .register("description", FieldKind::Text)
        .register("eligibility", FieldKind::TextList)
        .register("contact_email", FieldKind::Text)
        .register("url", FieldKind::Text)
        .register("cfda_number", FieldKind::Text)
        .set_searchable(&["title", "agency", "opportunity_number", "category", "description"]);
    r
}

pub fn challenges_registry() -> FieldRegistry {
    let mut r = FieldRegistry::new("id");
    r.register("id", FieldKind::Text)
        .register("title", FieldKind::Text)
        .register("agency", FieldKind::Text)
        .register("status", FieldKind::Enum)
        .register("prize_total", FieldKind::Number)
        .register("submission_start", FieldKind::Date)
        .register("submission_end", FieldKind::Date)
        .register("description", FieldKind::Text)
        .register("tags", FieldKind::TextList)
        .register("url", FieldKind::Text)
        .set_searchable(&["title", "agency", "description", "tags"]);
    r
}

pub fn sbir_awards_registry() -> FieldRegistry {
    let mut r = FieldRegistry::new("id");
    r.register("id", FieldKind::Text)
        .register("award_title", FieldKind::Text)
        .register("company_name", FieldKind::Text)
        .register("agency", FieldKind::Text)
        .register("branch", FieldKind::Text)
        .register("program", FieldKind::Enum)
        .register("phase", FieldKind::Enum)
        .register("award_amount", FieldKind::Number)
        .register("award_year", FieldKind::Number)
        .register("proposal_award_date", FieldKind::Date)
        .register("contract_end_date", FieldKind::Date)
        .register("abstract", FieldKind::Text)
        .register("city", FieldKind::Text)
        .register("state", FieldKind::Text)
        .set_searchable(&["award_title", "company_name", "agency", "abstract"]);
    r
}

pub fn sbir_companies_registry() -> FieldRegistry {
    let mut r = FieldRegistry::new("id");
    r.register("id", FieldKind::Text)
        .register("company_name", FieldKind::Text)
        .register("city", FieldKind::Text)
        .register("state", FieldKind::Text)
        .register("website", FieldKind::Text)
        .register("employee_count", FieldKind::Number)
        .register("woman_owned", FieldKind::Boolean)
        .register("hubzone_owned", FieldKind::Boolean)
        .register("total_awards", FieldKind::Number)
        .register("total_award_amount", FieldKind::Number)
        .set_searchable(&["company_name", "city", "state"]);
    r
}

pub fn sbir_solicitations_registry() -> FieldRegistry {
    let mut r = FieldRegistry::new("id");
    r.register("id", FieldKind::Text)
        .register("solicitation_title", FieldKind::Text)
        .register("agency", FieldKind::Text)
        .register("branch", FieldKind::Text)
        .register("program", FieldKind::Enum)
        .register("phase", FieldKind::Enum)
        .register("current_status", FieldKind::Enum)
        .register("release_date", FieldKind::Date)
        .register("open_date", FieldKind::Date)
        .register("close_date", FieldKind::Date)
        .register("topics", FieldKind::TextList)
        .register("url", FieldKind::Text)
        .set_searchable(&["solicitation_title", "agency", "topics"]);
    r
}

pub fn nofas_registry() -> FieldRegistry {
    let mut r = FieldRegistry::new("id");
    r.register("id", FieldKind::Text)
        .register("title", FieldKind::Text)
        .register("agency", FieldKind::Text)
        .register("nofa_number", FieldKind::Text)
        .register("status", FieldKind::Enum)
        .register("estimated_funding", FieldKind::Number)
        .register("award_floor", FieldKind::Number)
        .register("award_ceiling", FieldKind::Number)
        .register("posted_date", FieldKind::Date)
        .register("application_due_date", FieldKind::Date)
        .register("description", FieldKind::Text)
        .register("url", FieldKind::Text)
        .set_searchable(&["title", "agency", "nofa_number", "description"]);
    r
}

/// Fixed export column order per collection.
pub fn csv_columns(id: CollectionId) -> &'static [CsvColumn] {
    match id {
        CollectionId::Grants => const { &[
            CsvColumn::new("ID", "id"),
            CsvColumn::new("Title", "title"),
            CsvColumn::new("Agency", "agency"),
            CsvColumn::new("Category", "category"),
            CsvColumn::new("Status", "status"),
            CsvColumn::new("Award Floor", "award_floor"),
            CsvColumn::new("Award Ceiling", "award_ceiling"),
            CsvColumn::new("Total Funding", "total_funding"),
            CsvColumn::new("Posted Date", "posted_date"),
            CsvColumn::new("Close Date", "close_date"),
            CsvColumn::new("URL", "url"),
        ] },
        CollectionId::Challenges => const { &[
            CsvColumn::new("ID", "id"),
            CsvColumn::new("Title", "title"),
            CsvColumn::new("Agency", "agency"),
            CsvColumn::new("Status", "status"),
            CsvColumn::new("Prize Total", "prize_total"),
            CsvColumn::new("Submission End", "submission_end"),
            CsvColumn::new("URL", "url"),
        ] },
        CollectionId::SbirAwards => const { &[
            CsvColumn::new("ID", "id"),
            CsvColumn::new("Award Title", "award_title"),
            CsvColumn::new("Company", "company_name"),
            CsvColumn::new("Agency", "agency"),
            CsvColumn::new("Program", "program"),
            CsvColumn::new("Phase", "phase"),
            CsvColumn::new("Amount", "award_amount"),
            CsvColumn::new("Year", "award_year"),
        ] },
        CollectionId::SbirCompanies => const { &[
            CsvColumn::new("ID", "id"),
            CsvColumn::new("Company", "company_name"),
            CsvColumn::new("City", "city"),
            CsvColumn::new("State", "state"),
            CsvColumn::new("Employees", "employee_count"),
            CsvColumn::new("Total Awards", "total_awards"),
            CsvColumn::new("Total Award Amount", "total_award_amount"),
        ] },
        CollectionId::SbirSolicitations => const { &[
            CsvColumn::new("ID", "id"),
            CsvColumn::new("Title", "solicitation_title"),
            CsvColumn::new("Agency", "agency"),
            CsvColumn::new("Program", "program"),
            CsvColumn::new("Phase", "phase"),
            CsvColumn::new("Status", "current_status"),
            CsvColumn::new("Close Date", "close_date"),
        ] },
        CollectionId::Nofas => const { &[
            CsvColumn::new("ID", "id"),
            CsvColumn::new("Title", "title"),
            CsvColumn::new("Agency", "agency"),
            CsvColumn::new("NOFA Number", "nofa_number"),
            CsvColumn::new("Status", "status"),
            CsvColumn::new("Estimated Funding", "estimated_funding"),
            CsvColumn::new("Due Date", "application_due_date"),
        ] },
    }
}

/// The embedded last-resort fixture for a collection.
pub fn fixture_for(id: CollectionId) -> FixtureSource {
    match id {
        CollectionId::Grants => FixtureSource::new("grants-sample", GRANTS_SAMPLE),
        CollectionId::Challenges => FixtureSource::new("challenges-sample", CHALLENGES_SAMPLE),
        CollectionId::SbirAwards => FixtureSource::new("sbir-awards-sample", SBIR_AWARDS_SAMPLE),
        CollectionId::SbirCompanies => {
            FixtureSource::new("sbir-companies-sample", SBIR_COMPANIES_SAMPLE)
        }
        CollectionId::SbirSolicitations => {
            FixtureSource::new("sbir-solicitations-sample", SBIR_SOLICITATIONS_SAMPLE)
        }
        CollectionId::Nofas => FixtureSource::new("nofas-sample", NOFAS_SAMPLE),
    }
}

const GRANTS_SAMPLE: &str = r#"[
  {"id": "GRANT-2025-0001", "title": "Cybersecurity Innovation Challenge",
   "source": "grants.gov", "agency": "Department of Homeland Security",
   "category": "Science and Technology", "status": "Open",
   "funding_instrument": "Grant", "cost_sharing": false,
   "award_floor": 50000, "award_ceiling": 450000, "total_funding": 2000000,
   "expected_awards": 5, "posted_date": "2025-05-01", "close_date": "2025-08-15",
   "description": "Prototype defensive tooling for critical infrastructure.",
   "eligibility": "Small businesses; Nonprofits",
   "url": "https://example.gov/grants/0001"},
  {"id": "GRANT-2025-0002", "title": "Rural Broadband Expansion",
   "source": "grants.gov", "agency": "Department of Agriculture",
   "category": "Infrastructure", "status": "Open",
   "funding_instrument": "Cooperative Agreement", "cost_sharing": true,
   "award_ceiling": 7500000, "total_funding": 30000000,
   "posted_date": "2025-04-10", "close_date": "2025-10-01",
   "description": "Last-mile connectivity buildout for underserved counties.",
   "eligibility": "States; Municipalities",
   "url": "https://example.gov/grants/0002"},
  {"id": "GRANT-2025-0003", "title": "Community Health Pilot",
   "source": "grants.gov", "agency": "Department of Health and Human Services",
   "category": "Health", "status": "Forecasted",
   "funding_instrument": "Grant", "cost_sharing": false,
   "description": "Preventive care pilots; funding amounts to be announced.",
   "url": "https://example.gov/grants/0003"}
]"#;

const CHALLENGES_SAMPLE: &str = r#"[
  {"id": "CHAL-2025-01", "title": "Wildfire Sensing Prize",
   "agency": "National Aeronautics and Space Administration", "status": "Open",
   "prize_total": 1000000, "submission_start": "2025-03-01",
   "submission_end": "2025-09-30", "tags": "sensors; wildfire; earth-science",
   "description": "Low-cost airborne sensing for early wildfire detection.",
   "url": "https://example.gov/challenges/01"},
  {"id": "CHAL-2025-02", "title": "Digital Records Accessibility Challenge",
   "agency": "National Archives", "status": "Closed",
   "prize_total": 250000, "submission_end": "2025-02-28",
   "tags": "accessibility; archives",
   "description": "Machine-readable access to historical federal records.",
   "url": "https://example.gov/challenges/02"}
]"#;

const SBIR_AWARDS_SAMPLE: &str = r#"[
  {"id": "SBIR-AWD-9001", "award_title": "Compact Maritime Radar Arrays",
   "company_name": "TechCorp Innovations", "agency": "Department of Defense",
   "branch": "Navy", "program": "SBIR", "phase": "Phase II",
   "award_amount": 1499998, "award_year": 2024,
   "proposal_award_date": "2024-06-15", "contract_end_date": "2026-06-14",
   "abstract": "Beamforming radar arrays sized for unmanned surface vessels.",
   "city": "San Diego", "state": "CA"},
  {"id": "SBIR-AWD-9002", "award_title": "Autonomous Soil Sampling",
   "company_name": "Acme Robotics", "agency": "Department of Agriculture",
   "program": "STTR", "phase": "Phase I", "award_amount": 174925,
   "award_year": 2025, "proposal_award_date": "2025-01-20",
   "abstract": "Self-directing probes for precision agriculture.",
   "city": "Ames", "state": "IA"}
]"#;

const SBIR_COMPANIES_SAMPLE: &str = r#"[
  {"id": "SBIR-CO-100", "company_name": "TechCorp Innovations",
   "city": "San Diego", "state": "CA", "website": "https://techcorp.example",
   "employee_count": 48, "woman_owned": false, "hubzone_owned": false,
   "total_awards": 7, "total_award_amount": 5230000},
  {"id": "SBIR-CO-101", "company_name": "Acme Robotics",
   "city": "Ames", "state": "IA", "website": "https://acme.example",
   "employee_count": 12, "woman_owned": true, "hubzone_owned": true,
   "total_awards": 2, "total_award_amount": 349850}
]"#;

const SBIR_SOLICITATIONS_SAMPLE: &str = r#"[
  {"id": "SBIR-SOL-24-1", "solicitation_title": "Space Logistics Topics FY25",
   "agency": "National Aeronautics and Space Administration",
   "program": "SBIR", "phase": "Phase I", "current_status": "Open",
   "release_date": "2025-01-07", "open_date": "2025-02-01",
   "close_date": "2025-04-01", "topics": "logistics; propulsion; materials",
   "url": "https://example.gov/sbir/sol/24-1"}
]"#;

const NOFAS_SAMPLE: &str = r#"[
  {"id": "NOFA-25-HOME-01", "title": "HOME Investment Partnerships",
   "agency": "Department of Housing and Urban Development",
   "nofa_number": "FR-6700-N-01", "status": "Open",
   "estimated_funding": 12000000, "award_floor": 100000,
   "award_ceiling": 2500000, "posted_date": "2025-02-14",
   "application_due_date": "2025-06-30",
   "description": "Affordable housing development and rehabilitation.",
   "url": "https://example.gov/nofas/home-01"}
]"#;
