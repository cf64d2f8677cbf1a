//! Template rows.

use super::{SLOT_COUNT, TemplateSlot};

const TEACHING_AND_LEARNING: &str = "Improving teaching and learning in schools";

/// The 42 template slots, in slot order.
pub const TEMPLATE: [TemplateSlot; SLOT_COUNT] = [
    TemplateSlot {
        slot: 1,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Wages for support staff",
        code: "2211012204",
    },
    TemplateSlot {
        slot: 2,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Public transport",
        code: "2211011203",
    },
    TemplateSlot {
        slot: 3,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Heating and lighting",
        code: "2211011401",
    },
    TemplateSlot {
        slot: 4,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Telephone charges",
        code: "2211011402",
    },
    TemplateSlot {
        slot: 5,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Water and sanitation",
        code: "2211011405",
    },
    TemplateSlot {
        slot: 6,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Consumable stores",
        code: "2211011502",
    },
    TemplateSlot {
        slot: 7,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Postage",
        code: "2211011504",
    },
    TemplateSlot {
        slot: 8,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Printing cost",
        code: "2211011505",
    },
    TemplateSlot {
        slot: 9,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Publication and advertisement",
        code: "2211011406",
    },
    TemplateSlot {
        slot: 10,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Stationery",
        code: "2211011506",
    },
    TemplateSlot {
        slot: 11,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Uniform and protective wear",
        code: "2211011507",
    },
    TemplateSlot {
        slot: 12,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Fuel and Lubricants",
        code: "2211012401",
    },
    TemplateSlot {
        slot: 13,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Subscriptions",
        code: "2211012321",
    },
    TemplateSlot {
        slot: 14,
        program_no: 1,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Facilitating office operations",
        description: "Purchase of plant and office equipment",
        code: "2211010251",
    },
    TemplateSlot {
        slot: 15,
        program_no: 2,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Management of school based and National examinations",
        description: "Examinations",
        code: "2211011803",
    },
    TemplateSlot {
        slot: 16,
        program_no: 3,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Conducting budget and management meetings",
        description: "Fuel or 2103 public transport",
        code: "2211012401",
    },
    TemplateSlot {
        slot: 17,
        program_no: 3,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Conducting budget and management meetings",
        description: "Subsistence allowance",
        code: "2211011204",
    },
    TemplateSlot {
        slot: 18,
        program_no: 4,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "SMASSE",
        description: "Fuel or 2103 public transport",
        code: "2211012401",
    },
    TemplateSlot {
        slot: 19,
        program_no: 4,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "SMASSE",
        description: "Subsistence allowance",
        code: "2211011204",
    },
    TemplateSlot {
        slot: 20,
        program_no: 5,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Sporting activities",
        description: "Sporting equipment",
        code: "2211011805",
    },
    TemplateSlot {
        slot: 21,
        program_no: 5,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Sporting activities",
        description: "Fuel or 1203-Public transport",
        code: "2211012401",
    },
    TemplateSlot {
        slot: 22,
        program_no: 5,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Sporting activities",
        description: "Subsistence allowance",
        code: "2211011204",
    },
    TemplateSlot {
        slot: 23,
        program_no: 6,
        program_name: "Improve access for special needs education",
        sub_activity: "Support to SNE",
        description: "Purchase of special needs materials",
        code: "2211011806",
    },
    TemplateSlot {
        slot: 24,
        program_no: 7,
        program_name: "Procure and supply Secondary TLMs",
        sub_activity: "Procurement of teaching and learning materials",
        description: "Science consumables",
        code: "2211011807",
    },
    TemplateSlot {
        slot: 25,
        program_no: 7,
        program_name: "Procure and supply Secondary TLMs",
        sub_activity: "Procurement of teaching and learning materials",
        description: "Text books",
        code: "2211011804",
    },
    TemplateSlot {
        slot: 26,
        program_no: 7,
        program_name: "Procure and supply Secondary TLMs",
        sub_activity: "Procurement of teaching and learning materials",
        description: "Purchase of school supplies",
        code: "2211011808",
    },
    TemplateSlot {
        slot: 27,
        program_no: 8,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Support to HIV/AIDS related activities",
        description: "HIV/AIDS services",
        code: "2211011614",
    },
    TemplateSlot {
        slot: 28,
        program_no: 8,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Support to learners with first aid.",
        description: "Drugs",
        code: "2211011601",
    },
    TemplateSlot {
        slot: 29,
        program_no: 9,
        program_name: "Maintenance of infrastructure in secondary schools",
        sub_activity: "Maintenance of infrastructure",
        description: "Maintenance of buildings",
        code: "2211012501",
    },
    TemplateSlot {
        slot: 30,
        program_no: 9,
        program_name: "Maintenance of infrastructure in secondary schools",
        sub_activity: "Maintenance of infrastructure",
        description: "Maintenance of water supplies",
        code: "2211012504",
    },
    TemplateSlot {
        slot: 31,
        program_no: 10,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "COSOMA",
        description: "Subscription",
        code: "2211012321",
    },
    TemplateSlot {
        slot: 32,
        program_no: 10,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Computer Service Subscription",
        description: "Subscription",
        code: "2211012321",
    },
    TemplateSlot {
        slot: 33,
        program_no: 11,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "In-service training for teachers",
        description: "Consumables",
        code: "2211011502",
    },
    TemplateSlot {
        slot: 34,
        program_no: 11,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "In-service training for teachers",
        description: "Subsistence Allowances",
        code: "2211011204",
    },
    TemplateSlot {
        slot: 35,
        program_no: 11,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "In-service training for teachers",
        description: "Public transport or 2401 fuel",
        code: "2211011203",
    },
    TemplateSlot {
        slot: 36,
        program_no: 12,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Processing of Payment vouchers",
        description: "Subsistence Allowances",
        code: "2211011204",
    },
    TemplateSlot {
        slot: 37,
        program_no: 12,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Processing of Payment vouchers",
        description: "Public transport or 2401 fuel",
        code: "2211011203",
    },
    TemplateSlot {
        slot: 38,
        program_no: 13,
        program_name: "Provision of sanitary pads to girls in secondary schools",
        sub_activity: "Provision of sanitary pads to girls in secondary schools",
        description: "Consumables",
        code: "2211011502",
    },
    TemplateSlot {
        slot: 39,
        program_no: 14,
        program_name: "Provision of PPEs to schools",
        sub_activity: "Provision of PPEs to schools",
        description: "Consumables",
        code: "2211011502",
    },
    TemplateSlot {
        slot: 40,
        program_no: 15,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Provision of food and other boarding necessities to learners",
        description: "Boarding expenses",
        code: "2211011801",
    },
    TemplateSlot {
        slot: 41,
        program_no: 16,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Education visits",
        description: "Subsistence Allowances",
        code: "2211011204",
    },
    TemplateSlot {
        slot: 42,
        program_no: 16,
        program_name: TEACHING_AND_LEARNING,
        sub_activity: "Education visits",
        description: "Public transport or 2401 fuel",
        code: "2211011203",
    },
];
