use thiserror::Error;

// raised while building a network, never retried
#[derive(Error,Debug)]
pub enum ConfigurationError {
    #[error("Device {name} is not part of the network")]
    UnknownDevice{name:String},
    #[error("Device {name} has already been added to the network")]
    DuplicateDevice{name:String},
    #[error("Port {port} is not declared on device {device}")]
    UndeclaredPort{device:String,port:String},
    #[error("Port {device}:{port} is already linked to {peer}:{peer_port}")]
    PortAlreadyLinked{device:String,port:String,peer:String,peer_port:String},
    #[error("Port {device}:{port} is not linked")]
    PortNotLinked{device:String,port:String},
    #[error("Port {device}:{port} can't be linked to itself")]
    SelfLink{device:String,port:String},
    #[error("Device {device} can't have {count} ports, at most {max} are supported")]
    InvalidPortCount{device:String,count:usize,max:usize},
    #[error("Channel lower frequency {lower} must be lower than upper frequency {upper}")]
    InvalidChannel{lower:f64,upper:f64},
    #[error("Channel {lower}..{upper} GHz is outside of the {spectrum_lower}..{spectrum_upper} GHz spectrum")]
    ChannelOutOfSpectrum{lower:f64,upper:f64,spectrum_lower:f64,spectrum_upper:f64},
    #[error("Topology description could not be parsed: {0}")]
    Topology(#[from] serde_json::Error),
}

// the only error a routing query produces
#[derive(Error,Debug,Clone,PartialEq,Eq)]
#[error("No path found from {from} to {to}")]
pub struct PathNotFoundError {
    pub from:String,
    pub to:String,
}

impl PathNotFoundError {
    pub(crate) fn new(from:&str,to:&str) -> Self {
        Self {from:from.to_owned(),to:to.to_owned()}
    }
}

pub type Result<T> = std::result::Result<T,ConfigurationError>;
