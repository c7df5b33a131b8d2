//! Built-in copy shown until an admin saves real content.
//!
//! Only the four landing sections of each department page have defaults;
//! every other section falls back to `None`.

use crate::models::doctor::DoctorContent;
use crate::models::section::SectionContent;

pub const EYE_CARE: &str = "eye-care";
pub const GYNECOLOGY: &str = "gynecology";

/// Section keys that carry default copy on each department page.
pub const DEFAULT_SECTION_KEYS: [&str; 4] = ["hero", "why_choose_us", "conditions", "get_started"];

fn copy(page: &str, section_key: &str) -> Option<(&'static str, &'static str)> {
    let text = match (page, section_key) {
        (EYE_CARE, "hero") => (
            "Clear Vision, Expert Care",
            "Comprehensive eye examinations, cataract and refractive surgery, and \
             long-term management of eye conditions for the whole family.",
        ),
        (EYE_CARE, "why_choose_us") => (
            "Why Choose Our Eye Care",
            "Experienced ophthalmologists, modern diagnostic equipment and \
             personalised treatment plans with clear follow-up.",
        ),
        (EYE_CARE, "conditions") => (
            "Conditions We Treat",
            "Cataract, glaucoma, diabetic retinopathy, dry eye, refractive errors \
             and paediatric eye disorders.",
        ),
        (EYE_CARE, "get_started") => (
            "Book Your Eye Examination",
            "Schedule a consultation today. Bring any previous prescriptions and \
             a list of current medications.",
        ),
        (GYNECOLOGY, "hero") => (
            "Compassionate Women's Health Care",
            "Gynecological consultations, pregnancy care and minimally invasive \
             procedures in a private, supportive setting.",
        ),
        (GYNECOLOGY, "why_choose_us") => (
            "Why Choose Our Gynecology Team",
            "Board-certified specialists, evidence-based care and time to answer \
             every question at each visit.",
        ),
        (GYNECOLOGY, "conditions") => (
            "Conditions We Treat",
            "Menstrual disorders, PCOS, endometriosis, fibroids, menopause care \
             and fertility concerns.",
        ),
        (GYNECOLOGY, "get_started") => (
            "Book a Consultation",
            "Request an appointment online or by phone. First visits include a \
             full history and examination.",
        ),
        _ => return None,
    };
    Some(text)
}

/// Default copy for a section, if it has any.
pub fn section(page: &str, section_key: &str) -> Option<SectionContent> {
    copy(page, section_key).map(|(heading, description)| SectionContent {
        id: None,
        page: page.to_string(),
        section_key: section_key.to_string(),
        heading: heading.to_string(),
        description: description.to_string(),
        image_url: None,
        updated_at: None,
    })
}

/// Default profile shown for a doctor without a stored row.
pub fn doctor(doctor_key: &str) -> DoctorContent {
    DoctorContent {
        id: None,
        doctor_key: doctor_key.to_string(),
        name: "Our Specialist".to_string(),
        title: "Consultant".to_string(),
        description: "Our consultants bring years of clinical experience and a \
                      patient-first approach to every appointment."
            .to_string(),
        image_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_department_has_all_landing_sections() {
        for page in [EYE_CARE, GYNECOLOGY] {
            for key in DEFAULT_SECTION_KEYS {
                let s = section(page, key).unwrap_or_else(|| panic!("{page}/{key}"));
                assert!(!s.heading.is_empty());
                assert_eq!(s.id, None);
                assert_eq!(s.page, page);
            }
        }
    }

    #[test]
    fn unknown_sections_have_no_default() {
        assert!(section(EYE_CARE, "faq").is_none());
        assert!(section("about", "hero").is_none());
    }

    #[test]
    fn doctor_default_keeps_requested_key() {
        let d = doctor("dr-rao");
        assert_eq!(d.doctor_key, "dr-rao");
        assert_eq!(d.id, None);
    }
}
