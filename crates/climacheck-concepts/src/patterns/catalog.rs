//! Climate pattern catalog: `(pattern key, concept type, regex)`.
//!
//! Order matters. Matches are emitted in catalog order, which is the
//! secondary order seen by the overlap merge for equal start offsets.
//! Subscript characters (₂ ₃ ₆) are not word characters, so patterns that can
//! end on one use `\b{end-half}` instead of `\b`.

pub(crate) const PATTERN_TABLE: &[(&str, &str, &str)] = &[
    // ── Gases and emissions ───────────────────────────────────────────────
    ("co2", "EMISSION", r"(?i)\b(?:CO[₂2]|carbon\s+dioxide)(?:-eq)?\b{end-half}"),
    ("ch4", "EMISSION", r"(?i)\b(?:CH4|methane)\b"),
    ("n2o", "EMISSION", r"(?i)\b(?:N2O|nitrous\s+oxide)\b"),
    ("ghg", "EMISSION", r"(?i)\b(?:GHGs?|greenhouse\s+gases?)\b"),
    ("f_gases", "EMISSION", r"(?i)\b(?:F-?gases|fluorinated\s+gases)\b"),
    ("co2_lulucf", "EMISSION", r"(?i)\b(?:CO\s*[₂2]\s*-\s*LULUCF|carbon\s+dioxide\s+from\s+LULUCF)\b"),
    ("tco2_ffi", "EMISSION", r"(?i)\b(?:tCO[₂2]-FFI|tonnes\s+of\s+CO[₂2]\s+from\s+fossil\s+fuels\s+and\s+industry)\b"),
    ("pfcs", "EMISSION", r"(?i)\b(?:PFCs?|perfluorocarbons?)\b"),
    ("daccs", "EMISSION", r"(?i)\b(?:DACCS\+?|direct\s+air\s+carbon\s+capture\s+and\s+storage)\b{end-half}"),
    ("co2_eq", "EMISSION", r"(?i)\b(?:CO[₂2]-eq|carbon\s+dioxide\s+equivalen[ct]s?)\b"),
    ("hfcs", "EMISSION", r"(?i)\b(?:HFCs?|hydrofluorocarbons?)\b"),
    ("sf6", "EMISSION", r"(?i)\b(?:SF[₆6]|sulphur\s+hexafluoride|sulfur\s+hexafluoride)\b{end-half}"),
    ("o3", "EMISSION", r"(?i)\b(?:O[₃3]|ozone)\b{end-half}"),
    ("emissions", "EMISSION", r"(?i)\bemissions?\b"),
    ("fossil fuels", "EMISSION", r"(?i)\bfossil\s+fuels?\b"),
    ("black carbon", "EMISSION", r"(?i)\bblack\s+carbon\b"),
    ("soot", "EMISSION", r"(?i)\bsoot\b"),
    ("non-co2 emissions", "EMISSION", r"(?i)\bnon[-\s]?co2\s+emissions?\b"),
    ("short-lived climate forcers", "EMISSION", r"(?i)\b(?:short[-\s]?lived\s+climate\s+forcers?|SLCFs?)\b"),
    ("aerosols", "EMISSION", r"(?i)\baerosols?\b"),
    ("carbon dioxide removal", "EMISSION", r"(?i)\b(?:carbon\s+dioxide\s+removal|CDR)\b"),
    ("beccs", "EMISSION", r"(?i)\b(?:BECCS|bioenergy\s+with\s+carbon\s+capture\s+and\s+storage)\b"),
    ("ccs", "EMISSION", r"(?i)\b(?:CCS|carbon\s+capture\s+and\s+storage)\b"),
    ("ccu", "EMISSION", r"(?i)\b(?:CCU|carbon\s+capture\s+and\s+utili[sz]ation)\b"),
    ("cdr", "EMISSION", r"(?i)\b(?:CDR|carbon\s+dioxide\s+removal)\b"),
    ("co2_ffi", "EMISSION", r"(?i)\b(?:CO[₂2][-–]FFI|CO[₂2]\s+from\s+fossil\s+fuels\s+and\s+industry)\b"),
    ("ffi", "EMISSION", r"(?i)\b(?:FFI|fossil\s+fuels?\s+and\s+industry)\b"),
    ("lulucf", "EMISSION", r"(?i)\b(?:LULUCF|land[-\s]use,\s+land[-\s]use\s+change\s+and\s+forestry)\b"),
    ("nf3", "EMISSION", r"(?i)\b(?:NF3|nitrogen\s+trifluoride)\b"),
    ("rcb", "EMISSION", r"(?i)\bRCB\b"),
    ("rcp", "SCENARIO", r"(?i)\b(?:RCPs?|representative\s+concentration\s+pathways?)\b"),
    ("slcf", "EMISSION", r"(?i)\b(?:SLCFs?|short[-\s]?lived\s+climate\s+forcers?)\b"),
    ("tco2_eq", "EMISSION", r"(?i)\b(?:tCO[₂2]-eq|tonnes\s+of\s+CO[₂2]\s+equivalen[ct]s?)\b"),
    // ── Societal and economic terms ───────────────────────────────────────
    ("ssp", "SCENARIO", r"(?i)\b(?:SSP\d(?:-\d(?:\.\d)?)?|shared\s+socio[-\s]?economic\s+pathways?)\b"),
    ("afolu", "SCENARIO", r"(?i)\b(?:AFOLU|agriculture,\s*forestry?\s*and\s*other\s*land\s*use)\b"),
    ("crd", "SCENARIO", r"(?i)\bCRD\b"),
    ("baseline", "SCENARIO", r"(?i)\bbaseline\s+scenarios?\b"),
    ("mitigation", "POLICY", r"(?i)\bmitigation\s+pathways?\b"),
    ("overshoot", "POLICY", r"(?i)\bovershoot\s+scenarios?\b"),
    ("pathways", "SCENARIO", r"(?i)\b1\.5\s*(?:°C|degrees\s*C)\s+pathways?\b"),
    ("low-emission", "SCENARIO", r"(?i)\blow[-\s]?emission\s+scenarios?\b"),
    ("equality", "POLICY", r"(?i)\bequality\b"),
    ("inequality", "POLICY", r"(?i)\binequality\b"),
    ("equity", "POLICY", r"(?i)\bequity\b"),
    ("security", "POLICY", r"(?i)\bsecurity\b"),
    ("sustainability", "POLICY", r"(?i)\bsustainabilit(?:y|ies)\b"),
    ("fao", "SCENARIO", r"(?i)\b(?:FAO|food\s+and\s+agriculture\s+organi[sz]ation)\b"),
    ("gdp", "POLICY", r"(?i)\b(?:GDP|gross\s+domestic\s+product)\b"),
    ("iea_steps", "POLICY", r"(?i)\b(?:IEA[-\s]?STEPS|international\s+energy\s+agency\s+stated\s+polic(?:y|ies)\s+scenario)\b"),
    ("imp_ren", "SCENARIO", r"(?i)\bIMP\s*[-–]?\s*REN\b"),
    ("ldc", "POLICY", r"(?i)\b(?:LDCs?|least\s+developed\s+countries?)\b"),
    ("lk", "SCENARIO", r"(?i)\bLK\b"),
    ("ndc", "POLICY", r"(?i)\b(?:NDCs?|nationally\s+determined\s+contributions?)\b"),
    ("r_and_d", "SCENARIO", r"(?i)\b(?:R\s*&?\s*D|research\s+and\s+development)\b"),
    ("sdg", "SCENARIO", r"(?i)\b(?:SDGs?|sustainable\s+development\s+goals?)\b"),
    ("sdps", "POLICY", r"(?i)\bSDPs?\b"),
    ("sids", "SCENARIO", r"(?i)\b(?:SIDS|small\s+island\s+developing\s+states?)\b"),
    ("unfccc", "POLICY", r"(?i)\b(?:UNFCCC|united\s+nations\s+framework\s+convention\s+on\s+climate\s+change)\b"),
    ("usd", "IMPACT", r"(?i)\b(?:USD|US\s*dollars?)\b"),
    // ── Climate-change concepts ───────────────────────────────────────────
    ("net_zero", "POLICY", r"(?i)\bnet\s+zero\b"),
    ("net_zero_ghg", "POLICY", r"(?i)\bnet[-\s]?zero\s+(?:GHGs?|greenhouse\s+gases?|CO[₂2]|carbon\s+dioxide)\b{end-half}"),
    ("carbon_budget", "POLICY", r"(?i)\b(?:remaining\s+)?carbon\s+budget\b"),
    ("adaptation", "POLICY", r"(?i)\badaptation(?:\s+(?:gap|limits?))?\b"),
    ("resilience", "POLICY", r"(?i)\bresilien[ct]\w*\b"),
    ("imp_sp", "POLICY", r"(?i)\bIMP\s*-\s*SP\b"),
    ("srm", "CLIMATE_VAR", r"(?i)\b(?:SRM|solar\s+radiation\s+modification)\b"),
    ("drm", "POLICY", r"(?i)\b(?:DRM|disaster\s+risk\s+management)\b"),
    ("eba", "POLICY", r"(?i)\b(?:EbA|ecosystem[-\s]based\s+adaptation)\b"),
    ("gwl", "CLIMATE_VAR", r"(?i)\b(?:GWL|global\s+warming\s+levels?)\b"),
    ("imp", "CLIMATE_VAR", r"\b(?:IMP|(?i:illustrative\s+mitigation\s+pathways?))\b"),
    ("imp_ld", "CLIMATE_VAR", r"(?i)\bIMP\s*[-–]?\s*LD\b"),
    ("imp_neg", "CLIMATE_VAR", r"(?i)\bIMP\s*[-–]?\s*NEG\b"),
    ("ip_modact", "CLIMATE_VAR", r"(?i)\bIP[-–]?ModAct\b"),
    ("wim", "POLICY", r"(?i)\b(?:WIM|warsaw\s+international\s+mechanism)\b"),
    ("abrupt_climate_change", "POLICY", r"(?i)\babrupt\s+climate\s+change\b"),
    ("afforestation", "POLICY", r"(?i)\bafforestat(?:ion|e|ed)\b"),
    ("bioenergy", "POLICY", r"(?i)\bbioenergy\b"),
    ("cascading_impacts", "POLICY", r"(?i)\bcascading\s+impacts?\b"),
    ("deforestation", "POLICY", r"(?i)\bdeforestat(?:ion|e|ed)\b"),
    ("maladaptation", "POLICY", r"(?i)\bmaladapt(?:ation|ive)\b"),
    ("residual_risk", "POLICY", r"(?i)\bresidual\s+risk\b"),
    ("vulnerability", "POLICY", r"(?i)\bvulnerab(?:le|ility)\b"),
    // ── Temperatures and thresholds ───────────────────────────────────────
    ("temp_1_5c", "CLIMATE_VAR", r"(?i)\b1\.5\s*°?C\b"),
    ("temp_2c", "CLIMATE_VAR", r"(?i)\b2(?:\.0)?\s*°?C\b"),
    ("temp_xc", "CLIMATE_VAR", r"\b\d(?:\.\d)?\s*°?C\b"),
    ("temperature anomaly", "TEMPORAL", r"(?i)\btemperature\s+anomal(?:y|ies)\b"),
    ("ecs", "CLIMATE_VAR", r"(?i)\b(?:ECS|equilibrium\s+climate\s+sensitivity)\b"),
    // ── Observed and projected changes ────────────────────────────────────
    ("sea_level_rise", "CLIMATE_VAR", r"(?i)\bsea[-\s]+level\s+ris(?:e|es|ing)\b"),
    ("global_temp", "CLIMATE_VAR", r"(?i)\b(?:global\s+surface\s+temperature|warming\s+levels?)\b"),
    ("ice_sheet", "CLIMATE_VAR", r"(?i)\bice\s+sheets?\b"),
    ("precipitation", "CLIMATE_VAR", r"(?i)\bprecipitation\b"),
    ("weather", "CLIMATE_VAR", r"(?i)\bweather\s+(?:patterns?|events?)\b"),
    ("climate", "CLIMATE_VAR", r"(?i)\bclimate\s+(?:patterns?|systems?|variability)\b"),
    ("global", "CLIMATE_VAR", r"(?i)\bglobal\s+(?:warming|temperature)\b"),
    ("temperature", "CLIMATE_VAR", r"(?i)\btemperature\s+(?:rise|increase|change)\b"),
    ("radiative", "CLIMATE_VAR", r"(?i)\bradiative\s+forcing\b"),
    ("cid", "CLIMATE_VAR", r"(?i)\b(?:CID|climate\s+impact\s+drivers?)\b"),
    ("heatwaves", "CLIMATE_VAR", r"(?i)\bheat\s*waves?\b"),
    ("extreme", "CLIMATE_VAR", r"(?i)\bextreme\s+(?:weather|events?|temperature)\b"),
    ("gt", "IMPACT", r"(?i)\b(?:GT|gigatonnes?)\b"),
    // ── Impact and units ──────────────────────────────────────────────────
    ("gw", "IMPACT", r"(?i)\b(?:GW|gigawatts?)\b"),
    ("w_m2", "IMPACT", r"(?i)\bW\s*m[-²2]?\b"),
    ("gwp100", "IMPACT", r"(?i)\b(?:GWP100|100[-\s]?year\s+global\s+warming\s+potential)\b"),
    ("kwh", "IMPACT", r"(?i)\b(?:kWh|kilowatt[-\s]?hours?)\b"),
    ("lcoe", "IMPACT", r"(?i)\b(?:LCOE|levelized\s+cost\s+of\s+energy)\b"),
    ("mwh", "IMPACT", r"(?i)\b(?:MWh|megawatt[-\s]?hours?)\b"),
    ("ppp", "IMPACT", r"(?i)\b(?:PPP|purchasing\s+power\s+parity)\b"),
    ("gigatonnes", "EMISSION", r"(?i)\bgigatonnes?\b"),
    ("ppm", "EMISSION", r"(?i)\bppm\b"),
    ("ppb", "EMISSION", r"(?i)\bppb\b"),
    // ── Reports and assessments ───────────────────────────────────────────
    ("srocc", "REPORTS", r"(?i)\b(?:SROCC|special\s+report\s+on\s+(?:the\s+)?ocean\s+and\s+cryosphere)\b"),
    ("ar5", "REPORTS", r"(?i)\b(?:AR5|fifth\s+assessment\s+report)\b"),
    ("ar6", "REPORTS", r"(?i)\b(?:AR6|sixth\s+assessment\s+report)\b"),
    ("sr1_5", "REPORTS", r"(?i)\b(?:SR1\.5|SR15|special\s+report\s+on\s+global\s+warming\s+of\s+1\.5\s*°?C)\b"),
    ("srccl", "REPORTS", r"(?i)\b(?:SRCCL|special\s+report\s+on\s+climate\s+change\s+and\s+land)\b"),
    ("syr", "REPORTS", r"(?i)\b(?:SYR|synthesis\s+report)\b"),
    ("csb", "REPORTS", r"(?i)\bCSB\b"),
    ("rfcs", "REPORTS", r"(?i)\b(?:RFCs?|reasons\s+for\s+concern)\b"),
    // ── Models ────────────────────────────────────────────────────────────
    ("cmip5", "MODELS", r"(?i)\b(?:CMIP5|coupled\s+model\s+intercomparison\s+project\s+phase\s*5)\b"),
    ("cmip6", "MODELS", r"(?i)\b(?:CMIP6|coupled\s+model\s+intercomparison\s+project\s+phase\s*6)\b"),
    ("fair", "MODELS", r"\b(?:FaIR|FAIR|(?i:finite[-\s]amplitude\s+impulse\s+response))\b"),
    ("magicc", "MODELS", r"(?i)\b(?:MAGICC|model\s+for\s+the\s+assessment\s+of\s+greenhouse[-\s]gas\s+induced\s+climate\s+change)\b"),
    // ── Technology ────────────────────────────────────────────────────────
    ("ev", "TECHNOLOGY", r"(?i)\b(?:EVs?|electric\s+vehicles?)\b"),
    ("ews", "TECHNOLOGY", r"(?i)\b(?:EWS|early\s+warning\s+systems?)\b"),
    ("li_on", "TECHNOLOGY", r"(?i)\b(?:Li[-\s]?ion|lithium[-\s]?ion)\b"),
    ("pv", "TECHNOLOGY", r"(?i)\b(?:PV|photovoltaics?)\b"),
    // ── Agencies and organisations ────────────────────────────────────────
    ("iea", "AGENCIES", r"(?i)\b(?:IEA|international\s+energy\s+agency)\b"),
    ("ipcc", "AGENCIES", r"(?i)\b(?:IPCC|intergovernmental\s+panel\s+on\s+climate\s+change)\b"),
    ("who", "AGENCIES", r"\b(?:WHO|(?i:world\s+health\s+organi[sz]ation))\b"),
];

/// Climate-domain rules: `(concept type, regex)`, all case-insensitive.
pub(crate) const DOMAIN_RULE_TABLE: &[(&str, &str)] = &[
    ("CLIMATE_PHENOMENON", r"(?i)\b(?:el\s+ni[ñn]o|la\s+ni[ñn]a)\b"),
    ("CLIMATE_PHENOMENON", r"(?i)\b(?:arctic\s+oscillation|ao)\b"),
    ("CLIMATE_PHENOMENON", r"(?i)\b(?:north\s+atlantic\s+oscillation|nao)\b"),
    ("CLIMATE_PHENOMENON", r"(?i)\b(?:pacific\s+decadal\s+oscillation|pdo)\b"),
    ("CLIMATE_PHENOMENON", r"(?i)\b(?:atlantic\s+multidecadal\s+oscillation|amo)\b"),
    ("CLIMATE_PHENOMENON", r"(?i)\b(?:indian\s+ocean\s+dipole|iod)\b"),
    ("CLIMATE_PHENOMENON", r"(?i)\b(?:southern\s+annular\s+mode|sam)\b"),
    ("CLIMATE_PHENOMENON", r"(?i)\b(?:madden[-\s]?julian\s+oscillation|mjo)\b"),
    ("CLIMATE_SYSTEM", r"(?i)\b(?:thermohaline\s+circulation|thc)\b"),
    ("CLIMATE_SYSTEM", r"(?i)\b(?:meridional\s+overturning\s+circulation|moc)\b"),
    ("CLIMATE_SYSTEM", r"(?i)\b(?:atlantic\s+meridional\s+overturning\s+circulation|amoc)\b"),
    ("CLIMATE_SYSTEM", r"(?i)\bpolar\s+vortex\b"),
    ("CLIMATE_SYSTEM", r"(?i)\bjet\s+stream\b"),
    ("CLIMATE_SYSTEM", r"(?i)\bhadley\s+cell\b"),
    ("CLIMATE_SYSTEM", r"(?i)\bwalker\s+circulation\b"),
    ("IMPACT_METRIC", r"(?i)\b(?:degree\s+days?|heating\s+degree\s+days?|cooling\s+degree\s+days?)\b"),
    ("IMPACT_METRIC", r"(?i)\b(?:growing\s+season\s+length|gsl)\b"),
    ("IMPACT_METRIC", r"(?i)\bfrost\s+days?\b"),
    ("IMPACT_METRIC", r"(?i)\bheat\s+index\b"),
    ("IMPACT_METRIC", r"(?i)\bwet\s+bulb\s+temperature\b"),
    ("IMPACT_METRIC", r"(?i)\b(?:vapor\s+pressure\s+deficit|vpd)\b"),
];

/// Exact phrases for the phrase matcher: `(ruler id, concept type, phrases)`.
/// Matching is case-sensitive.
pub(crate) const RULER_TABLE: &[(&str, &str, &[&str])] = &[
    ("co2", "EMISSION", &["CO2", "CO₂", "carbon dioxide"]),
    ("ch4", "EMISSION", &["CH4", "methane"]),
    ("n2o", "EMISSION", &["N2O", "nitrous oxide"]),
    ("ghg", "EMISSION", &["GHG", "GHGs", "greenhouse gas", "greenhouse gases"]),
    ("net_zero", "POLICY", &["net zero", "net-zero"]),
    ("ipcc", "AGENCIES", &["IPCC", "Intergovernmental Panel on Climate Change"]),
    ("ar6", "REPORTS", &["AR6", "Sixth Assessment Report"]),
    ("sr1_5", "REPORTS", &["SR1.5", "Special Report on Global Warming of 1.5°C"]),
    ("temp_1_5c", "CLIMATE_VAR", &["1.5°C", "1.5 degrees Celsius"]),
    ("temp_2c", "CLIMATE_VAR", &["2°C", "2.0°C", "2 degrees Celsius"]),
    ("sea_level_rise", "CLIMATE_VAR", &["sea level rise", "sea-level rise"]),
    ("fossil_fuels", "EMISSION", &["fossil fuels", "fossil fuel"]),
    ("renewable_energy", "TECHNOLOGY", &["renewable energy", "clean energy"]),
    ("carbon_budget", "POLICY", &["carbon budget", "remaining carbon budget"]),
    ("paris_agreement", "POLICY", &["Paris Agreement", "Paris Climate Agreement"]),
];
