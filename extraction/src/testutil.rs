use crate::{
    description::{DType, ParameterDescriptor},
    literal::LiteralValue,
    taskname::TaskName,
};

pub fn task_name(s: &str) -> TaskName {
    s.parse().expect("expected valid TaskName value")
}

/// Descriptor with a default value and its inferred type.
pub fn param_with_default(info: &str, default: LiteralValue) -> ParameterDescriptor {
    ParameterDescriptor {
        info: info.into(),
        dtype: Some(default.dtype()),
        default: Some(default),
        ..Default::default()
    }
}

pub fn str_list(items: &[&str]) -> LiteralValue {
    LiteralValue::List(items.iter().map(|&s| LiteralValue::from(s)).collect())
}

/// Abridged `help(flagdata)` output.
pub const FLAGDATA_VERBOSE_HELP: &str = r#"Help on flagdata in module casatasks.flagging.flagdata object:

class _flagdata(builtins.object)
 |  flagdata ---- All-purpose flagging task based on data-selections and flagging modes/algorithms.
 |
 |  --------- parameter descriptions ---------------------------------------------
 |
 |  Arguments
 |  vis: Name of input visibility file
 |     Default Value: ''
 |  mode: Flagging mode
 |     Default Value: 'manual'
 |     Allowed Values:
 |       manual
 |       clip
 |       tfcrop
 |  ntime: Time range
 |     Default Value: 'scan'
 |  timecutoff: Flagging thresholds in units of deviation from the fit
 |     Default Value: 4.0
 |  maxnpieces: Number of pieces in the polynomial-fits
 |     Default Value: 7
 |  flagbackup: Back up the state of flags before the run
 |     Default Value: True
 |  spw: Spectral windows
 |     Default Value: ['0', '1']
 |  datacolumn: Data column on which to operate
 |     Default Value: DATA
 |
 |  Returns
 |  void
"#;

/// Abridged `inp(flagdata)` output.
pub const FLAGDATA_INPUT_LISTING: &str = r#"# flagdata :: All-purpose flagging task based on data-selections and flagging modes/algorithms.
vis                 =         ''        # Name of input visibility file
mode                =   'manual'        # Flagging mode
field               =         ''        # Field names or field index
                                        #   numbers: '' ==> all
timecutoff          =        4.0        # Flagging thresholds
maxnpieces          =          7        # Number of pieces
flagbackup          =       True        # Back up the state of flags
spw                 = ['0', '1']        # Spectral windows
"#;

/// Expected type tags, in order, for [FLAGDATA_VERBOSE_HELP] before conventions are applied.
pub const FLAGDATA_VERBOSE_HELP_DTYPES: [(&str, DType); 8] = [
    ("vis", DType::Str),
    ("mode", DType::Str),
    ("ntime", DType::Str),
    ("timecutoff", DType::Float),
    ("maxnpieces", DType::Int),
    ("flagbackup", DType::Bool),
    ("spw", DType::List),
    ("datacolumn", DType::Str),
];
